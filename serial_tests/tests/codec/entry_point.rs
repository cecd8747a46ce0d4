use super::fixtures::{greeting, Greeting, GREETING};
use anyhow::Result;
use serial_core::{Serial, SerialConfig, Serializer};
use serial_types::walker;
use serial_types::wire::{SerialWriter, WireType};
use serial_types::{SerialError, SerializationContext};

#[test]
fn greeting_round_trip() -> Result<()> {
    let serial = Serial::default();
    let bytes = serial.to_bytes(Some(&greeting()), &GREETING)?;

    // start(v0), "hello", 42, end
    assert_eq!(bytes.len(), 1 + 7 + 2 + 1);
    assert_eq!(bytes, serial.to_bytes(Some(&greeting()), &GREETING)?);
    assert_eq!(serial.from_bytes(&bytes, &GREETING)?, Some(greeting()));

    let dyn_serializer: &dyn Serializer<Greeting> = &GREETING;
    assert_eq!(serial.to_bytes(Some(&greeting()), dyn_serializer)?, bytes);
    Ok(())
}

#[test]
fn absent_values() -> Result<()> {
    let serial = Serial::from_config(&SerialConfig::default());
    assert!(serial.pool().is_none());

    let bytes = serial.to_bytes::<Greeting, _>(None, &GREETING)?;
    assert!(bytes.is_empty());
    assert_eq!(serial.from_bytes(&bytes, &GREETING)?, None);

    let mut w = SerialWriter::new();
    w.write_null();
    assert_eq!(serial.from_bytes(&w.serialized_data(), &GREETING)?, None);
    Ok(())
}

#[test]
fn debug_context_names_objects() -> Result<()> {
    let debug = Serial::new(SerializationContext::DEBUG);
    let release = Serial::new(SerializationContext::RELEASE);

    let bytes = debug.to_bytes(Some(&greeting()), &GREETING)?;
    // The class name string: header, length, 18 ascii bytes.
    assert_eq!(
        bytes.len(),
        release.to_bytes(Some(&greeting()), &GREETING)?.len() + 20
    );
    walker::validate(&bytes)?;
    assert_eq!(
        walker::dump_all(&bytes),
        "{\n    Object: GreetingSerializer, v0 {\n        String: \"hello\"\n        Integer: 42\n    }\n}"
    );

    assert_eq!(release.from_bytes(&bytes, &GREETING)?, Some(greeting()));
    Ok(())
}

fn mistyped_greeting() -> Result<Vec<u8>> {
    let mut w = SerialWriter::new();
    w.write_object_start(0)?
        .write_string("hello")?
        .write_string("oops")?
        .write_object_end();
    Ok(w.serialized_data())
}

#[test]
fn faults_carry_a_marked_dump() -> Result<()> {
    let bytes = mistyped_greeting()?;

    let res = Serial::new(SerializationContext::DEBUG).from_bytes(&bytes, &GREETING);
    match res {
        Err(SerialError::Serialization { cause, dump }) => {
            assert!(
                matches!(
                    *cause,
                    SerialError::TypeMismatch {
                        expected: WireType::Int,
                        position: 8,
                        ..
                    }
                ),
                "{cause:?}"
            );
            assert_eq!(
                dump,
                "{\n    Object: Unknown type, v0 {\n        String: \"hello\"\n        String: \"oops\" <<<\n    }\n}"
            );
        }
        other => panic!("{other:?}"),
    }

    let res = Serial::new(SerializationContext::RELEASE).from_bytes(&bytes, &GREETING);
    match res {
        Err(SerialError::Serialization { dump, .. }) => {
            assert_eq!(
                dump,
                "{\n    Object: Unknown type, v0 {\n        String (5)\n        String (4) <<<\n    }\n}"
            );
            assert!(!dump.contains("oops"));
        }
        other => panic!("{other:?}"),
    }
    Ok(())
}

#[test]
fn truncated_input() -> Result<()> {
    let bytes = Serial::default().to_bytes(Some(&greeting()), &GREETING)?;
    let bytes = &bytes[..5];

    let res = Serial::default().from_bytes(bytes, &GREETING);
    match res {
        Err(SerialError::Serialization { cause, dump }) => {
            assert!(matches!(*cause, SerialError::Truncated { .. }), "{cause:?}");
            assert!(dump.contains("\nERROR: "), "{dump}");
        }
        other => panic!("{other:?}"),
    }
    assert!(walker::validate(bytes).is_err());
    Ok(())
}
