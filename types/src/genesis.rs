//! Token genesis document.
//!
//! The genesis document is supplied by the network and is read-only here. Only
//! a handful of its fields feed into a transaction; everything else is
//! accepted and ignored so that newer documents still parse.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::network::NetworkRef;

/// Network description from the genesis document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisNetwork {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub chain_id: u64,
}

/// Signing domains, keyed by purpose.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignDomains {
    /// Domain for token transfers. Kept as raw JSON so that malformed
    /// entries surface as a validation error rather than a parse failure.
    #[serde(default)]
    pub token: Option<Vec<Value>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisProtocol {
    pub tx_version: String,
    #[serde(default)]
    pub sign_domains: Option<SignDomains>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisToken {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisCurrency {
    pub symbol: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenesisParameters {
    pub currency: GenesisCurrency,
}

/// The externally supplied token genesis document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenGenesisDocument {
    pub network: GenesisNetwork,
    pub protocol: GenesisProtocol,
    pub token: GenesisToken,
    pub parameters: GenesisParameters,
}

impl TokenGenesisDocument {
    /// Parse a genesis document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The `{id, chain_id}` pair a transaction on this network carries.
    pub fn network_ref(&self) -> NetworkRef {
        NetworkRef::new(self.network.id.clone(), self.network.chain_id)
    }

    /// Raw `protocol.sign_domains.token` entries, if present.
    pub fn token_sign_domain(&self) -> Option<&[Value]> {
        self.protocol
            .sign_domains
            .as_ref()
            .and_then(|d| d.token.as_deref())
    }

    pub fn currency_symbol(&self) -> &str {
        &self.parameters.currency.symbol
    }
}

/// A primitive signing-domain element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainValue {
    Text(String),
    Number(serde_json::Number),
}

impl DomainValue {
    /// Accept strings and numbers; anything else is not a valid domain element.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => Some(Self::Number(n.clone())),
            _ => None,
        }
    }

    /// String coercion used when feeding the domain to the signer.
    ///
    /// Numbers are printed the way JavaScript's `String(number)` prints them,
    /// so `1.0` becomes `"1"` and `1e21` becomes `"1e+21"`.
    pub fn to_domain_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => match n.as_f64() {
                Some(f) => js_number_string(f),
                None => n.to_string(),
            },
        }
    }
}

/// ECMAScript Number-to-String for a finite `f64`.
///
/// Rust's `{:e}` yields the shortest round-trip digits, which are then laid
/// out with the same fixed/exponent thresholds JavaScript uses.
fn js_number_string(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if !f.is_finite() {
        return if f.is_nan() {
            "NaN".to_string()
        } else if f > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exp: i32 = exp.parse().unwrap_or(0);
    let k = digits.len() as i32;
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", e.abs())
        }
    };

    if f < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}
