use serde::{Deserialize, Serialize};

/// Address family a resolution asks for. Selects the DNS record type on
/// the wire; IPv4 is the default throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFamily {
    #[default]
    Ipv4,
    Ipv6,
}

impl RecordFamily {
    pub fn record_type(&self) -> &'static str {
        match self {
            Self::Ipv4 => "A",
            Self::Ipv6 => "AAAA",
        }
    }
}

impl std::fmt::Display for RecordFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.record_type())
    }
}
