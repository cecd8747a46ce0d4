#[cfg(test)]
mod test {
    use super::super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn acquire_and_release() {
        let pool = BufferPool::with_buffers(2, 16);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.capacity(), 2);

        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        assert_eq!(a.len(), 16);
        assert!(pool.is_empty());
        assert_eq!(pool.acquire(), None);

        assert!(pool.release(a));
        assert!(pool.release(b));
        assert!(!pool.release(vec![0u8; 16]));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn starts_empty() {
        let pool = BufferPool::new(3);
        assert_eq!(pool.acquire(), None);

        assert!(pool.release(vec![1, 2, 3]));
        assert_eq!(pool.acquire(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn grown_buffers_are_cut_back() {
        let pool = BufferPool::with_buffers(1, 16);
        assert_eq!(pool.buffer_size(), Some(16));

        let mut buf = pool.acquire().unwrap();
        buf.resize(1 << 20, 7);
        assert!(pool.release(buf));

        let buf = pool.acquire().unwrap();
        assert_eq!(buf.len(), 16);
        assert!(buf.capacity() < 1 << 20);
        assert!(buf.iter().all(|byte| *byte == 0));
        pool.release(buf);

        let unsized_pool = BufferPool::new(1);
        assert_eq!(unsized_pool.buffer_size(), None);
        assert!(unsized_pool.release(vec![0u8; 4096]));
        assert_eq!(unsized_pool.acquire().map(|buf| buf.len()), Some(4096));
    }

    #[test]
    fn concurrent_borrowers_never_share() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 200;

        let pool = Arc::new(BufferPool::with_buffers(4, 8));
        thread::scope(|s| {
            for t in 0..THREADS {
                let pool = Arc::clone(&pool);
                s.spawn(move || {
                    for round in 0..ROUNDS {
                        let mut buf = match pool.acquire() {
                            Some(buf) => buf,
                            None => vec![0u8; 8],
                        };
                        let stamp = (t * ROUNDS + round) as u64;
                        buf[..8].copy_from_slice(&stamp.to_be_bytes());
                        thread::yield_now();
                        assert_eq!(&buf[..8], &stamp.to_be_bytes());
                        pool.release(buf);
                    }
                });
            }
        });

        assert_eq!(pool.len(), 4);
        let mut ptrs = HashSet::new();
        while let Some(buf) = pool.acquire() {
            assert!(ptrs.insert(buf.as_ptr()));
        }
        assert_eq!(ptrs.len(), 4);
    }
}
