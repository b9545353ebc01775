//! Request dispatch and tool handlers

use propsim_units::{ConversionError, Side, Value, UNITS};
use serde_json::{json, Map, Value as JsonValue};
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::protocol::{McpError, McpRequest, McpResponse};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "propsim-units";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const INTERNAL_ERROR: i32 = -32603;

/// Tool error code for a conversion that overflowed to a non-finite value
pub const NON_FINITE_RESULT: &str = "NON_FINITE_RESULT";

/// Stateless request handler; the unit registry is global
pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Server { config }
    }

    /// Handle one input line. Notifications (no `id`) get no response.
    pub fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let request = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => request,
            Err(e) => {
                warn!("Error parsing request: {}", e);
                return Some(McpResponse::from_result(None, Err(McpError::parse_error(e))));
            }
        };

        debug!("Processing: {}", request.method);
        let response = self.handle_request(&request);

        if request.id.is_none() {
            debug!("Notification processed (no response): {}", request.method);
            return None;
        }
        Some(response)
    }

    pub fn handle_request(&self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => handle_initialize(&request.params),
            "initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => handle_tools_list(),
            "tools/call" => self.handle_tool_call(&request.params),

            _ => Err(McpError::method_not_found(&request.method)),
        };

        McpResponse::from_result(request.id.clone(), result)
    }

    fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params.as_ref()
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params.get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));
        debug!(tool = name, "tool call");

        match name {
            "convert" => self.tool_convert(&args),
            "validate_units" => tool_validate_units(&args),
            "list_units" => tool_list_units(),
            "compatible_units" => tool_compatible_units(&args),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    fn tool_convert(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let raw = args.get("value")
            .ok_or_else(|| McpError::invalid_params("Missing value argument"))?;
        let from_unit = str_arg(args, "from_unit")?;
        let to_unit = str_arg(args, "to_unit")?;

        let value: Value = serde_json::from_value(raw.clone())
            .map_err(|_| McpError::invalid_params("value must be a number or a nested array of numbers"))?;

        let count = value.len();
        if count > self.config.max_elements {
            return Err(McpError::invalid_params(format!(
                "value has {} elements, limit is {}",
                count, self.config.max_elements
            )));
        }

        match propsim_units::convert(value, from_unit, to_unit) {
            Ok(converted) if converted.flatten().iter().any(|x| !x.is_finite()) => {
                debug!(from_unit, to_unit, "conversion overflowed");
                let message = format!("converting from {} to {} gives a non-finite result", from_unit, to_unit);
                Ok(json!({
                    "content": [{ "type": "text", "text": format!("Error: {}", message) }],
                    "error": { "code": NON_FINITE_RESULT, "message": message, "field": null },
                    "isError": true
                }))
            }
            Ok(converted) => {
                let text = match converted.as_scalar() {
                    Some(x) => format!("{} {} = {} {}", raw, from_unit, x, to_unit),
                    None => format!("Converted {} values from {} to {}", count, from_unit, to_unit),
                };
                Ok(json!({
                    "content": [{ "type": "text", "text": text }],
                    "value": converted,
                    "from_unit": from_unit,
                    "to_unit": to_unit,
                    "isError": false
                }))
            }
            Err(e) => Ok(conversion_failure(&e)),
        }
    }
}

fn str_arg<'a>(args: &'a JsonValue, name: &str) -> Result<&'a str, McpError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", name)))
}

/// Tool result for a rejected conversion, tied to the offending argument
fn conversion_failure(e: &ConversionError) -> JsonValue {
    let field = match e.side() {
        Some(Side::Source) => Some("from_unit"),
        Some(Side::Target) => Some("to_unit"),
        None => None,
    };
    debug!(code = e.code(), "conversion rejected: {}", e);

    json!({
        "content": [{ "type": "text", "text": format!("Error: {}", e) }],
        "error": { "code": e.code(), "message": e.to_string(), "field": field },
        "isError": true
    })
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit conversion for simulation inputs"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Convert numbers or nested arrays of numbers between units. Use 'list_units' to see the registry and 'compatible_units' to find valid targets. Units accept a power suffix (in^2) and metric prefixes (k, h, da, d, c, m, n)."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a number or nested array of numbers from one unit to another.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "description": "Number, or arbitrarily nested array of numbers"
                        },
                        "from_unit": {
                            "type": "string",
                            "description": "Unit of the value (e.g., \"psi\", \"mm^2\")"
                        },
                        "to_unit": {
                            "type": "string",
                            "description": "Target unit (e.g., \"kPa\", \"in^2\")"
                        }
                    },
                    "required": ["value", "from_unit", "to_unit"]
                }
            },
            {
                "name": "validate_units",
                "description": "Check whether one unit can be converted to another.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "from_unit": { "type": "string" },
                        "to_unit": { "type": "string" }
                    },
                    "required": ["from_unit", "to_unit"]
                }
            },
            {
                "name": "list_units",
                "description": "List every registered unit grouped by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "compatible_units",
                "description": "List the units a given unit can be converted to.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "unit": {
                            "type": "string",
                            "description": "Registered unit, optionally with a power suffix (e.g., \"ft^2\")"
                        }
                    },
                    "required": ["unit"]
                }
            }
        ]
    }))
}

fn tool_validate_units(args: &JsonValue) -> Result<JsonValue, McpError> {
    let from_unit = str_arg(args, "from_unit")?;
    let to_unit = str_arg(args, "to_unit")?;

    let valid = UNITS.validate(from_unit, to_unit).map_err(|e| {
        error!(from_unit, to_unit, "unexpected validation failure: {}", e);
        McpError { code: INTERNAL_ERROR, message: e.to_string(), data: None }
    })?;

    Ok(json!({
        "content": [{ "type": "text", "text": format!("{} -> {}: {}", from_unit, to_unit, if valid { "valid" } else { "invalid" }) }],
        "valid": valid
    }))
}

fn tool_list_units() -> Result<JsonValue, McpError> {
    let groups = propsim_units::units_by_category();

    let mut units = Map::new();
    let mut base_units = Map::new();
    for (category, symbols) in &groups {
        units.insert(category.name().to_string(), json!(symbols));
        base_units.insert(category.name().to_string(), json!(category.base_unit()));
    }

    let text = groups.iter()
        .map(|(category, symbols)| format!("- {}: {}", category, symbols.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "units": units,
        "base_units": base_units,
        "prefixes": UNITS.prefixes().iter()
            .map(|p| json!({ "symbol": p.symbol, "multiplier": p.multiplier }))
            .collect::<Vec<_>>()
    }))
}

fn tool_compatible_units(args: &JsonValue) -> Result<JsonValue, McpError> {
    let unit = str_arg(args, "unit")?;
    let units = UNITS.list_compatible_units(unit);

    let text = if units.is_empty() {
        format!("No units compatible with {}", unit)
    } else {
        units.join(", ")
    };

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "units": units
    }))
}
