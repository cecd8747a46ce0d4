use serial_core::serializers::{
    list_serializer, BaseSerializer, CharSerializer, StringSerializer, VariantOf, CHAR, STRING,
};
use serial_core::{Builder, BuilderSerializer, ObjectSerializer, Serializer, Valued, Versioned};
use serial_types::wire::{SerialReader, SerialWriter};
use serial_types::{SerialResult, SerializationContext};

#[derive(PartialEq, Clone, Debug)]
pub struct Greeting {
    pub text: String,
    pub count: i32,
}

pub fn greeting() -> Greeting {
    Greeting {
        text: "hello".into(),
        count: 42,
    }
}

pub struct GreetingSerializer;

impl ObjectSerializer<Greeting> for GreetingSerializer {
    fn serialize_object(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &Greeting,
    ) -> SerialResult<()> {
        w.write_string(&val.text)?.write_int(val.count);
        Ok(())
    }

    fn deserialize_object(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
        _version: u32,
    ) -> SerialResult<Greeting> {
        let text = r.read_string()?;
        let count = r.read_int()?;
        Ok(Greeting { text, count })
    }
}

pub const GREETING: Versioned<GreetingSerializer> = Versioned(GreetingSerializer);

/* A builder-style type that gained a field in version 1. */

#[derive(PartialEq, Clone, Debug)]
pub struct Profile {
    pub name: String,
    pub age: i32,
    pub tags: Vec<String>,
}

pub fn profile(tag_count: usize) -> Profile {
    Profile {
        name: "Zoë".into(),
        age: 31,
        tags: (0..tag_count).map(|i| format!("tag-{i}")).collect(),
    }
}

#[derive(Default, Debug)]
pub struct ProfileBuilder {
    name: Option<String>,
    age: Option<i32>,
    tags: Vec<String>,
}

impl Builder<Profile> for ProfileBuilder {
    fn is_valid(&self) -> bool {
        self.name.is_some()
    }

    fn build_object(self) -> Profile {
        Profile {
            name: self.name.unwrap_or_default(),
            age: self.age.unwrap_or(-1),
            tags: self.tags,
        }
    }
}

pub struct ProfileSerializer {
    pub version: u32,
}

impl BuilderSerializer<Profile> for ProfileSerializer {
    type Builder = ProfileBuilder;

    fn version(&self) -> u32 {
        self.version
    }

    fn create_builder(&self) -> ProfileBuilder {
        ProfileBuilder::default()
    }

    fn serialize_object(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &Profile,
    ) -> SerialResult<()> {
        w.write_string(&val.name)?.write_int(val.age);
        if self.version >= 1 {
            list_serializer(STRING).serialize(ctx, w, Some(&val.tags))?;
        }
        Ok(())
    }

    fn deserialize_to_builder(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
        builder: &mut ProfileBuilder,
        version: u32,
    ) -> SerialResult<()> {
        builder.name = Some(r.read_string()?);
        builder.age = Some(r.read_int()?);
        if version >= 1 {
            builder.tags = list_serializer(STRING).deserialize_not_null(ctx, r)?;
        }
        Ok(())
    }
}

/* A base type with several kinds. */

#[derive(PartialEq, Clone, Debug)]
pub struct Click {
    pub x: i32,
    pub y: i32,
}

#[derive(PartialEq, Clone, Debug)]
pub enum Event {
    Click(Click),
    Key(char),
    Text(String),
}

pub struct ClickSerializer;

impl ObjectSerializer<Click> for ClickSerializer {
    fn serialize_object(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &Click,
    ) -> SerialResult<()> {
        w.write_int(val.x).write_int(val.y);
        Ok(())
    }

    fn deserialize_object(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
        _version: u32,
    ) -> SerialResult<Click> {
        let x = r.read_int()?;
        let y = r.read_int()?;
        Ok(Click { x, y })
    }
}

fn click_variant() -> VariantOf<Event, Click, Versioned<ClickSerializer>> {
    VariantOf::new(
        Versioned(ClickSerializer),
        |event| match event {
            Event::Click(click) => Some(click),
            _ => None,
        },
        Event::Click,
    )
}

fn key_variant() -> VariantOf<Event, char, Valued<CharSerializer>> {
    VariantOf::new(
        CHAR,
        |event| match event {
            Event::Key(key) => Some(key),
            _ => None,
        },
        Event::Key,
    )
}

fn text_variant() -> VariantOf<Event, String, Valued<StringSerializer>> {
    VariantOf::new(
        STRING,
        |event| match event {
            Event::Text(text) => Some(text),
            _ => None,
        },
        Event::Text,
    )
}

/// All kinds, in the order they were introduced.
pub fn event_serializer() -> BaseSerializer<Event> {
    BaseSerializer::new()
        .variant(click_variant())
        .variant(key_variant())
        .variant(text_variant())
}

/// A reader that no longer knows about clicks.
pub fn event_serializer_without_clicks() -> BaseSerializer<Event> {
    BaseSerializer::new()
        .retired()
        .variant(key_variant())
        .variant(text_variant())
}
