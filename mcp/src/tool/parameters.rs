//! Parameter definitions for our MCP tools
//!
//! Each tool declares a `&'static [ParameterSpec]`. The same slice drives the JSON
//! schema advertised to the host and the validation in [`super::arguments`].

use rmcp::model::JsonObject;
use serde_json::{Value, json};
use strum::IntoStaticStr;

/// Every parameter name used by any tool, serialized to the wire as camelCase.
/// Entries are alphabetically sorted for easy maintenance
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum ParameterName {
    /// Feed "y" to license prompts
    AcceptLicenses,
    /// SDK manager action
    Action,
    /// Activity to start
    ActivityName,
    /// Local APK file
    ApkPath,
    /// Clear the log buffer before reading
    Clear,
    /// Shell command
    Command,
    /// Hardware profile for a new AVD
    Device,
    /// Target device serial
    DeviceSerial,
    /// Case-insensitive substring filter
    Filter,
    /// Overwrite or force-stop
    Force,
    /// Include obsolete SDK packages
    IncludeObsolete,
    /// Include uninstalled packages that kept their data
    IncludeUninstalled,
    /// Keep app data on uninstall
    KeepData,
    /// Minimum logcat priority
    Level,
    /// Number of logcat lines
    Lines,
    /// Local file path
    LocalPath,
    /// AVD name
    Name,
    /// Start the emulator headless
    NoWindow,
    /// SDK package or system image
    Package,
    /// Android package name
    PackageName,
    /// Replace an existing install
    Reinstall,
    /// Path on the device
    RemotePath,
    /// Wipe user data on emulator start
    WipeData,
}

impl ParameterName {
    /// Key used in the argument bag
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// JSON type of a parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterKind {
    /// Free text
    String,
    /// `true` / `false`
    Boolean,
    /// Whole number, optionally bounded below
    Integer {
        /// Smallest accepted value
        minimum: Option<i64>,
    },
    /// One of a fixed set of strings, matched case-insensitively
    Enum(&'static [&'static str]),
}

/// Value used when an optional parameter is omitted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultValue {
    /// Boolean default
    Bool(bool),
    /// Integer default
    Integer(i64),
    /// String default
    Str(&'static str),
}

impl DefaultValue {
    /// JSON form of the default
    pub fn to_value(self) -> Value {
        match self {
            Self::Bool(value) => Value::Bool(value),
            Self::Integer(value) => Value::from(value),
            Self::Str(value) => Value::from(value),
        }
    }
}

/// Contract for one parameter
#[derive(Clone, Copy, Debug)]
pub struct ParameterSpec {
    /// Wire name
    pub name:        ParameterName,
    /// JSON type
    pub kind:        ParameterKind,
    /// Description shown to the host
    pub description: &'static str,
    /// Whether the key must be present
    pub required:    bool,
    /// Whether a blank string is rejected
    pub non_empty:   bool,
    /// Applied when the key is absent
    pub default:     Option<DefaultValue>,
}

impl ParameterSpec {
    const fn new(name: ParameterName, kind: ParameterKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            non_empty: false,
            default: None,
        }
    }

    /// Optional string
    pub const fn string(name: ParameterName, description: &'static str) -> Self {
        Self::new(name, ParameterKind::String, description)
    }

    /// Optional boolean defaulting to `false`
    pub const fn boolean(name: ParameterName, description: &'static str) -> Self {
        Self::new(name, ParameterKind::Boolean, description).with_default(DefaultValue::Bool(false))
    }

    /// Optional integer
    pub const fn integer(name: ParameterName, description: &'static str) -> Self {
        Self::new(name, ParameterKind::Integer { minimum: None }, description)
    }

    /// Optional enum
    pub const fn one_of(
        name: ParameterName,
        allowed: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self::new(name, ParameterKind::Enum(allowed), description)
    }

    /// Mark as required
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Reject blank strings
    pub const fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Value applied when the key is absent
    pub const fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Lower bound for integers
    pub const fn with_minimum(mut self, minimum: i64) -> Self {
        if let ParameterKind::Integer { .. } = self.kind {
            self.kind = ParameterKind::Integer {
                minimum: Some(minimum),
            };
        }
        self
    }

    /// Key used in the argument bag
    pub fn key(&self) -> &'static str {
        self.name.key()
    }

    fn to_property(self) -> Value {
        let mut property = match self.kind {
            ParameterKind::String => json!({ "type": "string" }),
            ParameterKind::Boolean => json!({ "type": "boolean" }),
            ParameterKind::Integer { minimum } => minimum.map_or_else(
                || json!({ "type": "integer" }),
                |minimum| json!({ "type": "integer", "minimum": minimum }),
            ),
            ParameterKind::Enum(allowed) => json!({ "type": "string", "enum": allowed }),
        };

        if let Value::Object(map) = &mut property {
            map.insert("description".to_string(), Value::from(self.description));
            if let Some(default) = self.default {
                map.insert("default".to_string(), default.to_value());
            }
        }
        property
    }
}

/// Optional target serial shared by the device-scoped tools
pub const DEVICE_SERIAL: ParameterSpec = ParameterSpec::string(
    ParameterName::DeviceSerial,
    "Serial of the target device (see android-devices). Defaults to the first online device",
);

/// JSON schema object for a tool's input contract
pub fn build_input_schema(specs: &[ParameterSpec]) -> JsonObject {
    let properties: JsonObject = specs
        .iter()
        .map(|spec| (spec.key().to_string(), spec.to_property()))
        .collect();
    let required: Vec<&str> = specs
        .iter()
        .filter(|spec| spec.required)
        .map(ParameterSpec::key)
        .collect();

    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), Value::from("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert("required".to_string(), json!(required));
    schema
}
