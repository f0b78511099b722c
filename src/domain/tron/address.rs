use {
    serde::{Deserialize, Deserializer, Serialize, Serializer, de},
    std::{
        fmt::{self, Debug, Display, Formatter},
        str::FromStr,
    },
};

/// Every TRON address starts with this byte.
pub const PREFIX: u8 = 0x41;

const BYTES_LEN: usize = 21;
const BASE58_LEN: usize = 34;
const HEX_LEN: usize = 42;

/// A TRON account or contract address: the `0x41` network byte followed by
/// the 20 byte account hash.
///
/// Base58check (`T...`) is the canonical user facing format and the one used
/// for [`Display`] and serialization. Hex (`41...` or `0x41...`) is accepted
/// when parsing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; BYTES_LEN]);

impl Address {
    /// Builds an address from the 20 byte account hash.
    pub fn from_account_hash(hash: [u8; 20]) -> Self {
        let mut bytes = [PREFIX; BYTES_LEN];
        bytes[1..].copy_from_slice(&hash);
        Self(bytes)
    }

    pub fn from_base58(s: &str) -> Result<Self, InvalidAddress> {
        let data = bs58::decode(s)
            .with_check(None)
            .into_vec()
            .map_err(|_| InvalidAddress::Checksum)?;
        Self::from_slice(&data)
    }

    /// Parses a hex address, with or without `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, InvalidAddress> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let data = hex::decode(s).map_err(|_| InvalidAddress::Hex)?;
        Self::from_slice(&data)
    }

    fn from_slice(data: &[u8]) -> Result<Self, InvalidAddress> {
        let bytes: [u8; BYTES_LEN] = data.try_into().map_err(|_| InvalidAddress::Length)?;
        if bytes[0] != PREFIX {
            return Err(InvalidAddress::Prefix);
        }
        Ok(Self(bytes))
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).with_check().into_string()
    }

    /// Lowercase hex including the `41` network byte, without `0x`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The 20 byte account hash, i.e. the address as seen by the TVM.
    pub fn account_hash(&self) -> &[u8] {
        &self.0[1..]
    }
}

impl FromStr for Address {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.len() {
            BASE58_LEN if s.starts_with('T') => Self::from_base58(s),
            HEX_LEN => Self::from_hex(s),
            len if len == HEX_LEN + 2 && s.starts_with("0x") => Self::from_hex(s),
            _ => Err(InvalidAddress::Format),
        }
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Address({} / 0x{})", self.to_base58(), self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAddress {
    #[error("expected base58 (34 chars starting with 'T') or hex (42 chars starting with '41')")]
    Format,
    #[error("invalid base58check encoding")]
    Checksum,
    #[error("invalid hex encoding")]
    Hex,
    #[error("expected 21 address bytes")]
    Length,
    #[error("address must start with 0x41")]
    Prefix,
}
