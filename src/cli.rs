use std::str::FromStr;

use crate::coercion::{AllowLossy, CastContext};
use crate::dictionary::CountOrder;
use crate::error::Result;
use crate::object::{Character, Value, Vector};
use crate::types::{KindTag, Prototype, Registry};

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// Resolve the common type of a sequence of types
    Common {
        #[arg(required = true, value_parser = parse_ptype)]
        types: Vec<Prototype>,
    },

    /// Cast character values to another type
    Cast {
        #[arg(long, value_parser = parse_ptype)]
        to: Prototype,

        /// Permit casts that lose information
        #[arg(long)]
        allow_lossy: bool,

        values: Vec<String>,
    },

    /// Count occurrences of each distinct value
    Count {
        #[arg(long, default_value_t = CountOrder::Count)]
        sort: CountOrder,

        values: Vec<String>,
    },
}

/// Parse a prototype from a type name such as `integer` or `unspecified`
///
/// Only types that can be named without further structure are accepted.
///
pub fn parse_ptype(s: &str) -> std::result::Result<Prototype, String> {
    if s == "unspecified" {
        return Ok(Prototype::Unspecified);
    }

    match KindTag::from_str(s) {
        Ok(KindTag::Null) => Ok(Prototype::Null),
        Ok(KindTag::Logical) => Ok(Prototype::Logical),
        Ok(KindTag::Integer) => Ok(Prototype::Integer),
        Ok(KindTag::Double) => Ok(Prototype::Double),
        Ok(KindTag::Complex) => Ok(Prototype::Complex),
        Ok(KindTag::Character) => Ok(Prototype::Character),
        Ok(KindTag::Raw) => Ok(Prototype::Raw),
        Ok(KindTag::List) => Ok(Prototype::List),
        Ok(kind) => Err(format!("type '{kind}' can't be named on the command line")),
        Err(_) => Err(format!("unknown type '{s}'")),
    }
}

/// Character vector from command line values, reading `NA` as missing
fn character(values: &[String]) -> Value {
    let values: Vec<Character> = values
        .iter()
        .map(|v| match v.as_str() {
            "NA" => Character::NA,
            v => Character::from(v),
        })
        .collect();
    Value::from(values)
}

impl Cli {
    pub fn level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Run a command against the process-wide registry, producing its output
    pub fn run(&self) -> Result<String> {
        let reg = Registry::global();

        match &self.command {
            Command::Common { types } => Ok(reg.common_type_all(types, None)?.to_string()),
            Command::Cast {
                to,
                allow_lossy,
                values,
            } => {
                let mut ctx = CastContext::new();
                if *allow_lossy {
                    ctx = ctx.allow(AllowLossy::any());
                }
                Ok(reg.cast(&character(values), to, &ctx)?.to_string())
            }
            Command::Count { sort, values } => {
                let counts = reg.count(&character(values), *sort)?;
                let Value::Vector(Vector::Character(keys)) = &counts.key else {
                    return Err(crate::internal_err!("count keys lost their type"));
                };

                let rows: Vec<String> = keys
                    .iter()
                    .zip(&counts.count)
                    .map(|(k, n)| format!("{k}\t{n}"))
                    .collect();
                Ok(rows.join("\n"))
            }
        }
    }
}
