use serde::{
    de::{self, DeserializeOwned},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::debug;

use crate::panels::{Graph, Row, SingleStat};

/// A displayable unit of a dashboard.
///
/// On the wire a panel is a flat object whose `type` field selects the shape
/// of the remaining fields. Documents without a known `type` decode into
/// [`Panel::Empty`] instead of failing, so that dashboards written for newer
/// panel kinds still load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Empty,
    Row(Row),
    Graph(Graph),
    SingleStat(SingleStat),
}

impl From<Row> for Panel {
    fn from(value: Row) -> Self {
        Self::Row(value)
    }
}

impl From<Graph> for Panel {
    fn from(value: Graph) -> Self {
        Self::Graph(value)
    }
}

impl From<SingleStat> for Panel {
    fn from(value: SingleStat) -> Self {
        Self::SingleStat(value)
    }
}

impl Panel {
    pub const DISCRIMINATOR: &'static str = "type";

    pub const fn to_type(&self) -> Option<PanelType> {
        match self {
            Self::Empty => None,
            Self::Row(_) => Some(PanelType::Row),
            Self::Graph(_) => Some(PanelType::Graph),
            Self::SingleStat(_) => Some(PanelType::SingleStat),
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Decodes a panel from raw JSON bytes.
    ///
    /// An empty buffer is an absent panel.
    pub fn from_slice(data: &[u8]) -> Result<Self, PanelError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::Empty);
        }

        ::serde_json::from_slice(data)
            .map_err(PanelError::Parse)
            .and_then(Self::from_value)
    }

    pub fn from_value(value: Value) -> Result<Self, PanelError> {
        // peek the discriminator only; the whole document is decoded below
        let type_ = match &value {
            Value::Null => return Ok(Self::Empty),
            Value::Object(fields) => match fields.get(Self::DISCRIMINATOR) {
                None | Some(Value::Null) => {
                    if !fields.is_empty() {
                        debug!("dropping a panel without type");
                    }
                    None
                }
                Some(Value::String(type_)) => match type_.parse() {
                    Ok(type_) => Some(type_),
                    Err(_) => {
                        debug!("dropping a panel with unknown type: {type_:?}");
                        None
                    }
                },
                Some(value) => return Err(PanelError::InvalidDiscriminator(kind_of(value))),
            },
            value => return Err(PanelError::NotObject(kind_of(value))),
        };

        match type_ {
            Some(PanelType::Row) => decode(PanelType::Row, value).map(Self::Row),
            Some(PanelType::Graph) => decode(PanelType::Graph, value).map(Self::Graph),
            Some(PanelType::SingleStat) => {
                decode(PanelType::SingleStat, value).map(Self::SingleStat)
            }
            None => Ok(Self::Empty),
        }
    }

    pub fn to_value(&self) -> Result<Value, PanelError> {
        ::serde_json::to_value(self).map_err(PanelError::Encode)
    }
}

fn decode<T>(kind: PanelType, value: Value) -> Result<T, PanelError>
where
    T: DeserializeOwned,
{
    ::serde_json::from_value(value).map_err(|source| PanelError::Decode { kind, source })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for Panel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        #[serde(tag = "type", rename_all = "lowercase")]
        enum TaggedPanel<'a> {
            Row(&'a Row),
            Graph(&'a Graph),
            SingleStat(&'a SingleStat),
        }

        match self {
            Self::Empty => serializer.serialize_map(Some(0))?.end(),
            Self::Row(panel) => TaggedPanel::Row(panel).serialize(serializer),
            Self::Graph(panel) => TaggedPanel::Graph(panel).serialize(serializer),
            Self::SingleStat(panel) => TaggedPanel::SingleStat(panel).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Panel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
            .and_then(|value| Self::from_value(value).map_err(de::Error::custom))
    }
}

// NOTE: JsonSchema has no support for merging the variants of an untagged union
mod _impl_jsonschema_for_panel {
    use schemars::{gen::SchemaGenerator, schema::Schema, JsonSchema};

    use super::PanelType;
    use crate::panels::{Graph, Row, SingleStat};

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    #[serde(rename_all = "camelCase")]
    struct Panel {
        #[serde(rename = "type")]
        type_: Option<PanelType>,
        #[serde(flatten)]
        row: Row,
        #[serde(flatten)]
        graph: Graph,
        #[serde(flatten)]
        single_stat: SingleStat,
    }

    impl JsonSchema for super::Panel {
        fn is_referenceable() -> bool {
            <Panel as JsonSchema>::is_referenceable()
        }

        fn schema_name() -> String {
            <Panel as JsonSchema>::schema_name()
        }

        fn json_schema(gen: &mut SchemaGenerator) -> Schema {
            <Panel as JsonSchema>::json_schema(gen)
        }
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    EnumString,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PanelType {
    Row,
    Graph,
    SingleStat,
}

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("failed to parse a panel document: {0}")]
    Parse(#[source] ::serde_json::Error),
    #[error("expected a panel object, but given {0}")]
    NotObject(&'static str),
    #[error("expected the panel type to be a string, but given {0}")]
    InvalidDiscriminator(&'static str),
    #[error("failed to decode a {kind} panel: {source}")]
    Decode {
        kind: PanelType,
        #[source]
        source: ::serde_json::Error,
    },
    #[error("failed to encode a panel: {0}")]
    Encode(#[source] ::serde_json::Error),
}

impl PanelError {
    pub const fn is_decode(&self) -> bool {
        !self.is_encode()
    }

    pub const fn is_encode(&self) -> bool {
        matches!(self, Self::Encode(_))
    }
}
