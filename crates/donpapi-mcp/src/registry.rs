//! Declarations of the operations exposed to MCP clients.
//!
//! The parameter schemas here are what `tools/list` advertises. Enforcement
//! happens separately, when arguments are deserialized into the typed
//! requests of `donpapi_mcp_core::request`.

use donpapi_mcp_core::{DEFAULT_GUI_BIND, JsonObject};
use serde_json::{Value, json};
use std::str::FromStr;

pub const COLLECT: &str = "donpapi_collect";
pub const START_GUI: &str = "donpapi_start_gui";
pub const STOP_GUI: &str = "donpapi_stop_gui";

pub const DEFAULT_THREADS: u32 = 50;

/// The callable operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Collect,
    StartGui,
    StopGui,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Collect, Operation::StartGui, Operation::StopGui];

    /// Name advertised in `tools/list`
    pub fn name(self) -> &'static str {
        match self {
            Operation::Collect => COLLECT,
            Operation::StartGui => START_GUI,
            Operation::StopGui => STOP_GUI,
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    /// Accepts the advertised names and their unprefixed aliases
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            COLLECT | "collect" => Ok(Operation::Collect),
            START_GUI | "start_gui" => Ok(Operation::StartGui),
            STOP_GUI | "stop_gui" => Ok(Operation::StopGui),
            other => Err(format!("Unknown tool: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Boolean,
    Integer,
}

impl ParamKind {
    fn json_type(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Boolean => "boolean",
            ParamKind::Integer => "integer",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<Value>,
}

impl ParamSpec {
    fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: true,
            default: None,
        }
    }

    fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }

    fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub operation: Operation,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    pub fn name(&self) -> &'static str {
        self.operation.name()
    }

    /// JSON Schema object describing the parameters
    pub fn input_schema(&self) -> JsonObject {
        let mut properties = JsonObject::new();
        for param in &self.params {
            let mut property = JsonObject::new();
            property.insert("type".into(), json!(param.kind.json_type()));
            if !param.description.is_empty() {
                property.insert("description".into(), json!(param.description));
            }
            if let Some(default) = &param.default {
                property.insert("default".into(), default.clone());
            }
            properties.insert(param.name.into(), Value::Object(property));
        }

        let mut schema = JsonObject::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));

        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }

        schema
    }

    pub fn to_tool(&self, default_gui_port: u16) -> rmcp::model::Tool {
        let mut schema = self.input_schema();
        // The advertised port default follows DONPAPI_GUI_PORT
        if self.operation == Operation::StartGui {
            if let Some(Value::Object(port)) = schema
                .get_mut("properties")
                .and_then(|p| p.get_mut("port"))
            {
                port.insert("default".into(), json!(default_gui_port));
            }
        }
        rmcp::model::Tool::new(self.name(), self.description, schema)
    }
}

/// All operations, in the order they are listed
pub fn tool_specs() -> Vec<ToolSpec> {
    Operation::ALL.iter().map(|op| tool_spec(*op)).collect()
}

pub fn tool_spec(operation: Operation) -> ToolSpec {
    match operation {
        Operation::Collect => ToolSpec {
            operation,
            description: "Collect secrets from remote targets",
            params: vec![
                ParamSpec::required(
                    "targets",
                    ParamKind::String,
                    "Target IP(s), range(s), hostname(s), or 'ALL' for domain scan. Space separated.",
                ),
                ParamSpec::optional("domain", ParamKind::String, "Target Domain"),
                ParamSpec::required("username", ParamKind::String, "Username for authentication"),
                ParamSpec::optional("password", ParamKind::String, "Password for authentication"),
                ParamSpec::optional("hashes", ParamKind::String, "NTLM hashes (LMHASH:NTHASH)"),
                ParamSpec::optional(
                    "use_kerberos",
                    ParamKind::Boolean,
                    "Use Kerberos authentication (-k)",
                )
                .with_default(json!(false)),
                ParamSpec::optional(
                    "collectors",
                    ParamKind::String,
                    "Specific collectors (e.g. 'Chromium,Firefox'). Default: All",
                ),
                ParamSpec::optional("threads", ParamKind::Integer, "Number of concurrent threads")
                    .with_default(json!(DEFAULT_THREADS)),
            ],
        },
        Operation::StartGui => ToolSpec {
            operation,
            description: "Start DonPAPI Web GUI to browse collected secrets",
            params: vec![
                ParamSpec::optional("port", ParamKind::Integer, "Port the GUI listens on")
                    .with_default(json!(8088)),
                ParamSpec::optional("bind", ParamKind::String, "Address the GUI binds to")
                    .with_default(json!(DEFAULT_GUI_BIND)),
            ],
        },
        Operation::StopGui => ToolSpec {
            operation,
            description: "Stop DonPAPI Web GUI",
            params: vec![],
        },
    }
}
