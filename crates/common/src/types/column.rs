use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt::{self, Display};

/// Column type as sent by the service: primitives are plain strings
/// (`"integer"`, `"varchar(255)"`), complex types are JSON objects keyed by
/// `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum DataType {
    Primitive(String),
    List(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    Struct(Vec<(String, DataType)>),
    Union(Vec<DataType>),
    Unparsed(String),
    External(String),
}

impl DataType {
    pub fn primitive(name: impl Into<String>) -> Self {
        DataType::Primitive(name.into())
    }

    /// Short human readable form, e.g. `list<integer>` or `map<string,long>`.
    pub fn simple_string(&self) -> String {
        match self {
            DataType::Primitive(name) => name.clone(),
            DataType::List(element) => format!("list<{}>", element.simple_string()),
            DataType::Map(key, value) => {
                format!("map<{},{}>", key.simple_string(), value.simple_string())
            }
            DataType::Struct(fields) => {
                let fields = fields
                    .iter()
                    .map(|(name, ty)| format!("{name}:{}", ty.simple_string()))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("struct<{fields}>")
            }
            DataType::Union(types) => {
                let types = types
                    .iter()
                    .map(DataType::simple_string)
                    .collect::<Vec<_>>()
                    .join(",");
                format!("union<{types}>")
            }
            DataType::Unparsed(raw) => format!("unparsed({raw})"),
            DataType::External(raw) => format!("external({raw})"),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.simple_string())
    }
}

impl TryFrom<Value> for DataType {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(DataType::Primitive(name)),
            Value::Object(mut obj) => {
                let kind = obj
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or_else(|| "complex data type without a `type` field".to_string())?
                    .to_owned();
                let mut take = |field: &str| {
                    obj.remove(field)
                        .ok_or_else(|| format!("`{kind}` data type is missing `{field}`"))
                };
                match kind.as_str() {
                    "list" => {
                        let element: DataType = take("elementType")?.try_into()?;
                        Ok(DataType::List(Box::new(element)))
                    }
                    "map" => {
                        let key: DataType = take("keyType")?.try_into()?;
                        let value: DataType = take("valueType")?.try_into()?;
                        Ok(DataType::Map(Box::new(key), Box::new(value)))
                    }
                    "struct" => {
                        let Value::Array(fields) = take("fields")? else {
                            return Err("struct `fields` must be an array".to_string());
                        };
                        fields
                            .into_iter()
                            .map(struct_field)
                            .collect::<Result<Vec<_>, _>>()
                            .map(DataType::Struct)
                    }
                    "union" => {
                        let Value::Array(types) = take("types")? else {
                            return Err("union `types` must be an array".to_string());
                        };
                        types
                            .into_iter()
                            .map(DataType::try_from)
                            .collect::<Result<Vec<_>, _>>()
                            .map(DataType::Union)
                    }
                    "unparsed" => Ok(DataType::Unparsed(string_field(take("unparsedType")?))),
                    "external" => Ok(DataType::External(string_field(take("catalogString")?))),
                    other => Err(format!("unsupported data type `{other}`")),
                }
            }
            other => Err(format!("unexpected data type value: {other}")),
        }
    }
}

fn struct_field(value: Value) -> Result<(String, DataType), String> {
    let Value::Object(mut field) = value else {
        return Err("struct field must be an object".to_string());
    };
    let name = field
        .remove("name")
        .map(string_field)
        .ok_or_else(|| "struct field is missing `name`".to_string())?;
    let ty: DataType = field
        .remove("type")
        .ok_or_else(|| format!("struct field `{name}` is missing `type`"))?
        .try_into()?;
    Ok((name, ty))
}

fn string_field(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Column of a table, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    /// `None` when the service sent no type or one this client cannot read.
    #[serde(rename = "type", default, deserialize_with = "lenient_data_type")]
    pub data_type: Option<DataType>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default = "nullable_by_default")]
    pub nullable: bool,
    #[serde(default)]
    pub auto_increment: bool,
}

fn lenient_data_type<'de, D>(deserializer: D) -> Result<Option<DataType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match DataType::try_from(value) {
        Ok(data_type) => Some(data_type),
        Err(reason) => {
            debug!("ignoring column data type: {reason}");
            None
        }
    }))
}

fn nullable_by_default() -> bool {
    true
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: Option<DataType>) -> Self {
        Self {
            name: name.into(),
            data_type,
            comment: None,
            nullable: true,
            auto_increment: false,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
}
