use crate::error::CatalogClientError;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Version reported by this client during the compatibility check.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `major.minor.patch`; pre-release suffixes such as `-SNAPSHOT` are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FromStr for Version {
    type Err = CatalogClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let core = s.trim().split(['-', '+']).next().unwrap_or_default();
        let parts = core
            .split('.')
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| CatalogClientError::invalid_response(format!("Invalid version '{s}'")))?;

        match parts.as_slice() {
            [major, minor, patch] => Ok(Version {
                major: *major,
                minor: *minor,
                patch: *patch,
            }),
            _ => Err(CatalogClientError::invalid_response(format!(
                "Invalid version '{s}'"
            ))),
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A client newer than the server may send requests the server cannot serve.
pub fn check_compatible(client: &str, server: &str) -> Result<(), CatalogClientError> {
    let client_version: Version = client.parse()?;
    let server_version: Version = server.parse()?;

    if client_version > server_version {
        return Err(CatalogClientError::version_mismatch(format!(
            "Client version {client_version} is higher than server version {server_version}."
        )));
    }
    Ok(())
}
