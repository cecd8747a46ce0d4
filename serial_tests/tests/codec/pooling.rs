use super::fixtures::{profile, Profile, ProfileSerializer};
use anyhow::Result;
use serial_core::ds_n_a::buffer_pool::BufferPool;
use serial_core::{Built, Serial, SerialConfig};
use serial_types::SerializationContext;
use std::sync::Arc;
use std::thread;

const PROFILE: Built<ProfileSerializer> = Built(ProfileSerializer { version: 1 });

#[test]
fn pooled_output_matches_unpooled() -> Result<()> {
    let pooled = Serial::from_config(&SerialConfig {
        buffer_count: 2,
        buffer_size: 4,
        ..Default::default()
    });
    let plain = Serial::default();

    let mut largest = 0;
    for tag_count in [0, 1, 50] {
        let val = profile(tag_count);
        let bytes = pooled.to_bytes(Some(&val), &PROFILE)?;
        assert_eq!(bytes, plain.to_bytes(Some(&val), &PROFILE)?);
        assert_eq!(pooled.from_bytes(&bytes, &PROFILE)?, Some(val));
        largest = largest.max(bytes.len());
    }

    // Buffers that grew are back at the configured size.
    let pool = pooled.pool().unwrap();
    assert_eq!(pool.len(), 2);
    let bufs = [pool.acquire().unwrap(), pool.acquire().unwrap()];
    for buf in bufs {
        assert_eq!(buf.len(), 4);
        assert!(buf.capacity() < largest);
        pool.release(buf);
    }
    assert_eq!(pool.len(), 2);
    Ok(())
}

#[test]
fn initial_buffer_size_does_not_matter() -> Result<()> {
    let serial = Serial::default();
    let val = profile(50);

    let mut small = vec![0u8; 4];
    let mut large = vec![0u8; 4096];
    let mut empty = vec![];
    let from_small = serial.to_bytes_with_buffer(Some(&val), &PROFILE, &mut small)?;
    let from_large = serial.to_bytes_with_buffer(Some(&val), &PROFILE, &mut large)?;
    let from_empty = serial.to_bytes_with_buffer(Some(&val), &PROFILE, &mut empty)?;

    assert_eq!(from_small, from_large);
    assert_eq!(from_small, from_empty);
    assert!(small.len() >= from_small.len());
    assert_eq!(large.len(), 4096);
    assert_eq!(empty.len(), 1024);

    let mut untouched = vec![0u8; 4];
    let bytes = serial.to_bytes_with_buffer::<Profile, _>(None, &PROFILE, &mut untouched)?;
    assert!(bytes.is_empty());
    assert_eq!(untouched.len(), 4);
    Ok(())
}

#[test]
fn concurrent_serialization() -> Result<()> {
    const THREADS: usize = 8;
    const ROUNDS: usize = 50;

    let pool = Arc::new(BufferPool::with_buffers(2, 16));
    let pooled = Serial::with_pool(SerializationContext::RELEASE, Arc::clone(&pool));
    let plain = Serial::default();

    thread::scope(|s| {
        let handles = (0..THREADS)
            .map(|t| {
                let pooled = &pooled;
                let plain = &plain;
                s.spawn(move || -> Result<()> {
                    for round in 0..ROUNDS {
                        let val = Profile {
                            name: format!("p{t}-{round}"),
                            age: round as i32,
                            tags: (0..round % 7).map(|i| i.to_string()).collect(),
                        };
                        let bytes = pooled.to_bytes(Some(&val), &PROFILE)?;
                        assert_eq!(bytes, plain.to_bytes(Some(&val), &PROFILE)?);
                        assert_eq!(pooled.from_bytes(&bytes, &PROFILE)?, Some(val));
                    }
                    Ok(())
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Result<Vec<_>>>()
    })?;

    assert_eq!(pool.len(), 2);
    Ok(())
}
