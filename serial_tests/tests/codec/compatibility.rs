use super::fixtures::{
    event_serializer, event_serializer_without_clicks, greeting, profile, Click, Event, Profile,
    ProfileSerializer, GREETING,
};
use anyhow::Result;
use itertools::Itertools;
use rand::seq::SliceRandom;
use serial_core::serializers::list_serializer;
use serial_core::{Built, Serial};
use serial_types::wire::SerialWriter;
use serial_types::{walker, SerialError};

#[test]
fn newer_writer_is_rejected() -> Result<()> {
    let serial = Serial::default();
    let bytes = serial.to_bytes(Some(&profile(3)), &Built(ProfileSerializer { version: 1 }))?;

    let res = serial.from_bytes(&bytes, &Built(ProfileSerializer { version: 0 }));
    match res {
        Err(SerialError::Serialization { cause, .. }) => {
            assert!(
                matches!(*cause, SerialError::Version { found: 1, max: 0 }),
                "{cause:?}"
            );
        }
        other => panic!("{other:?}"),
    }
    Ok(())
}

#[test]
fn older_writer_is_read_with_defaults() -> Result<()> {
    let serial = Serial::default();
    let bytes = serial.to_bytes(Some(&profile(3)), &Built(ProfileSerializer { version: 0 }))?;

    let actual = serial.from_bytes(&bytes, &Built(ProfileSerializer { version: 1 }))?;
    let expected = Profile {
        tags: vec![],
        ..profile(3)
    };
    assert_eq!(actual, Some(expected));
    Ok(())
}

#[test]
fn partially_written_object() -> Result<()> {
    let serial = Serial::default();
    let s = Built(ProfileSerializer { version: 1 });

    let mut w = SerialWriter::new();
    w.write_object_start(1)?.write_string("Ana")?.write_object_end();
    let actual = serial.from_bytes(&w.serialized_data(), &s)?;
    let expected = Profile {
        name: "Ana".into(),
        age: -1,
        tags: vec![],
    };
    assert_eq!(actual, Some(expected));

    let mut w = SerialWriter::new();
    w.write_object_start(1)?.write_object_end();
    let res = serial.from_bytes(&w.serialized_data(), &s);
    match res {
        Err(SerialError::Serialization { cause, .. }) => {
            assert!(matches!(*cause, SerialError::Validation(_)), "{cause:?}");
        }
        other => panic!("{other:?}"),
    }
    Ok(())
}

#[test]
fn appended_fields_are_ignored() -> Result<()> {
    let g = greeting();
    let mut w = SerialWriter::new();
    w.write_object_start(0)?
        .write_string(&g.text)?
        .write_int(g.count)
        .write_long(7)
        .write_object_start(4)?
        .write_opt_string(None)?
        .write_object_end()
        .write_object_end();
    let bytes = w.serialized_data();

    walker::validate(&bytes)?;
    assert_eq!(Serial::default().from_bytes(&bytes, &GREETING)?, Some(g));
    Ok(())
}

#[test]
fn events_in_any_order() -> Result<()> {
    let serial = Serial::default();
    let s = list_serializer(event_serializer());

    let all_events = [
        Event::Click(Click { x: -1, y: 2 }),
        Event::Click(Click { x: 0, y: 0 }),
        Event::Key('q'),
        Event::Key('ß'),
        Event::Text(String::new()),
        Event::Text("ünïcode".into()),
    ];
    for mut events in all_events.iter().cloned().powerset() {
        events.shuffle(&mut rand::thread_rng());
        let bytes = serial.to_bytes(Some(&events), &s)?;
        walker::validate(&bytes)?;
        assert_eq!(serial.from_bytes(&bytes, &s)?, Some(events));
    }
    Ok(())
}

#[test]
fn retired_kinds() -> Result<()> {
    let serial = Serial::default();
    let old = event_serializer();
    let new = event_serializer_without_clicks();

    let click = Event::Click(Click { x: 3, y: 4 });
    let bytes = serial.to_bytes(Some(&click), &old)?;
    assert_eq!(serial.from_bytes(&bytes, &new)?, None);

    let key = Event::Key('k');
    let bytes = serial.to_bytes(Some(&key), &old)?;
    assert_eq!(bytes, serial.to_bytes(Some(&key), &new)?);
    assert_eq!(serial.from_bytes(&bytes, &new)?, Some(key));

    let res = serial.to_bytes(Some(&click), &new);
    assert!(
        matches!(res, Err(SerialError::UnregisteredVariant(_))),
        "{res:?}"
    );
    Ok(())
}
