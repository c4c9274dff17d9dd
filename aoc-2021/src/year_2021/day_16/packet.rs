//! BITS packet tree: decoding from a bit stream and evaluation

use std::fmt;

use thiserror::Error;
use tracing::trace;

use super::bit_reader::{BitError, BitReader};

/// Type id marking a literal value packet
pub const LITERAL_TYPE_ID: u8 = 4;

const VERSION_BITS: usize = 3;
const TYPE_ID_BITS: usize = 3;
const GROUP_BITS: usize = 5;
const LENGTH_TYPE_BITS: usize = 1;
const BIT_LENGTH_BITS: usize = 15;
const PACKET_COUNT_BITS: usize = 11;

/// Deepest sub-packet nesting the decoder follows before giving up
pub const MAX_NESTING: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error(transparent)]
    Bits(#[from] BitError),
    #[error("malformed packet: {0}")]
    MalformedPacket(String),
    #[error("literal value does not fit in 64 bits")]
    LiteralOverflow,
    #[error("{0} overflowed 64 bits")]
    ArithmeticOverflow(Operator),
}

/// The operation an operator packet applies to its children's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Sum,
    Product,
    Minimum,
    Maximum,
    GreaterThan,
    LessThan,
    EqualTo,
}

impl Operator {
    /// Operator for a non-literal type id
    pub fn from_type_id(type_id: u8) -> Option<Self> {
        match type_id {
            0 => Some(Self::Sum),
            1 => Some(Self::Product),
            2 => Some(Self::Minimum),
            3 => Some(Self::Maximum),
            5 => Some(Self::GreaterThan),
            6 => Some(Self::LessThan),
            7 => Some(Self::EqualTo),
            _ => None,
        }
    }

    pub fn type_id(self) -> u8 {
        match self {
            Self::Sum => 0,
            Self::Product => 1,
            Self::Minimum => 2,
            Self::Maximum => 3,
            Self::GreaterThan => 5,
            Self::LessThan => 6,
            Self::EqualTo => 7,
        }
    }

    fn is_comparison(self) -> bool {
        matches!(self, Self::GreaterThan | Self::LessThan | Self::EqualTo)
    }

    /// Whether a packet of this operator may have `children` sub-packets
    pub fn accepts(self, children: usize) -> bool {
        if self.is_comparison() {
            children == 2
        } else {
            children >= 1
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Sum => "+",
            Self::Product => "*",
            Self::Minimum => "min",
            Self::Maximum => "max",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::EqualTo => "==",
        }
    }

    /// Reduce already-evaluated child values.
    pub fn apply(self, values: &[u64]) -> Result<u64, PacketError> {
        let arity = || {
            PacketError::MalformedPacket(format!("{self} applied to {} values", values.len()))
        };
        match self {
            Self::Sum => values
                .iter()
                .try_fold(0u64, |acc, &v| acc.checked_add(v))
                .ok_or(PacketError::ArithmeticOverflow(self)),
            Self::Product => values
                .iter()
                .try_fold(1u64, |acc, &v| acc.checked_mul(v))
                .ok_or(PacketError::ArithmeticOverflow(self)),
            Self::Minimum => values.iter().copied().min().ok_or_else(arity),
            Self::Maximum => values.iter().copied().max().ok_or_else(arity),
            Self::GreaterThan | Self::LessThan | Self::EqualTo => match values {
                [a, b] => Ok(u64::from(match self {
                    Self::GreaterThan => a > b,
                    Self::LessThan => a < b,
                    _ => a == b,
                })),
                _ => Err(arity()),
            },
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::GreaterThan => "greater-than",
            Self::LessThan => "less-than",
            Self::EqualTo => "equal-to",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Literal(u64),
    Operator {
        op: Operator,
        children: Vec<Packet>,
    },
}

/// A decoded packet. Immutable once built; owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    version: u8,
    payload: Payload,
}

impl Packet {
    pub fn literal(version: u8, value: u64) -> Self {
        Self {
            version: version & 0b111,
            payload: Payload::Literal(value),
        }
    }

    /// Build an operator packet, rejecting child counts the operator can't take.
    pub fn operator(version: u8, op: Operator, children: Vec<Packet>) -> Result<Self, PacketError> {
        if !op.accepts(children.len()) {
            return Err(PacketError::MalformedPacket(format!(
                "{op} packet with {} sub-packets",
                children.len()
            )));
        }
        Ok(Self {
            version: version & 0b111,
            payload: Payload::Operator { op, children },
        })
    }

    /// Decode a complete transmission.
    ///
    /// Everything after the outermost packet must be zero padding.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, PacketError> {
        let mut reader = BitReader::new(bytes);
        let packet = Self::read(&mut reader)?;
        if !reader.is_done() {
            return Err(PacketError::MalformedPacket(format!(
                "non-zero data in the {} bits after the outermost packet",
                reader.remaining()
            )));
        }
        Ok(packet)
    }

    /// Read one packet, and recursively its sub-packets, at the reader's cursor.
    ///
    /// Trees nested deeper than [`MAX_NESTING`] are rejected as malformed.
    pub fn read(reader: &mut BitReader) -> Result<Self, PacketError> {
        Self::read_nested(reader, 0)
    }

    fn read_nested(reader: &mut BitReader, depth: usize) -> Result<Self, PacketError> {
        if depth > MAX_NESTING {
            return Err(PacketError::MalformedPacket(format!(
                "sub-packets nested more than {MAX_NESTING} levels deep"
            )));
        }
        let start = reader.position();
        let version = reader.read(VERSION_BITS)? as u8;
        let type_id = reader.read(TYPE_ID_BITS)? as u8;

        if type_id == LITERAL_TYPE_ID {
            let value = read_literal(reader)?;
            trace!(start, version, value, "literal packet");
            return Ok(Self::literal(version, value));
        }

        let op = Operator::from_type_id(type_id).ok_or_else(|| {
            PacketError::MalformedPacket(format!("unknown type id {type_id}"))
        })?;

        let children = if reader.read(LENGTH_TYPE_BITS)? == 0 {
            let length = reader.read(BIT_LENGTH_BITS)? as usize;
            trace!(start, version, %op, length, "operator packet, bit length");
            read_bit_delimited(reader, length, depth + 1)?
        } else {
            let count = reader.read(PACKET_COUNT_BITS)?;
            trace!(start, version, %op, count, "operator packet, sub-packet count");
            (0..count)
                .map(|_| Self::read_nested(reader, depth + 1))
                .collect::<Result<Vec<_>, _>>()?
        };

        Self::operator(version, op, children)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn type_id(&self) -> u8 {
        match &self.payload {
            Payload::Literal(_) => LITERAL_TYPE_ID,
            Payload::Operator { op, .. } => op.type_id(),
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.payload, Payload::Literal(_))
    }

    pub fn literal_value(&self) -> Option<u64> {
        match self.payload {
            Payload::Literal(value) => Some(value),
            Payload::Operator { .. } => None,
        }
    }

    /// Sub-packets in encounter order; empty for literals.
    pub fn children(&self) -> &[Packet] {
        match &self.payload {
            Payload::Literal(_) => &[],
            Payload::Operator { children, .. } => children,
        }
    }

    /// Every packet in the tree, parents before children.
    pub fn iter(&self) -> Packets<'_> {
        Packets { stack: vec![self] }
    }

    pub fn version_sum(&self) -> u64 {
        self.iter().map(|p| u64::from(p.version)).sum()
    }

    /// Evaluate the expression tree.
    pub fn evaluate(&self) -> Result<u64, PacketError> {
        match &self.payload {
            Payload::Literal(value) => Ok(*value),
            Payload::Operator { op, children } => {
                let values = children
                    .iter()
                    .map(Packet::evaluate)
                    .collect::<Result<Vec<_>, _>>()?;
                op.apply(&values)
            }
        }
    }
}

/// Renders the tree as an s-expression, e.g. `(+ 1 (* 2 3))`.
impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Literal(value) => write!(f, "{value}"),
            Payload::Operator { op, children } => {
                write!(f, "({}", op.symbol())?;
                for child in children {
                    write!(f, " {child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Pre-order iterator over a packet tree
pub struct Packets<'a> {
    stack: Vec<&'a Packet>,
}

impl<'a> Iterator for Packets<'a> {
    type Item = &'a Packet;

    fn next(&mut self) -> Option<Self::Item> {
        let packet = self.stack.pop()?;
        self.stack.extend(packet.children().iter().rev());
        Some(packet)
    }
}

fn read_literal(reader: &mut BitReader) -> Result<u64, PacketError> {
    let mut value = 0u64;
    loop {
        let group = reader.read(GROUP_BITS)?;
        if value >> 60 != 0 {
            return Err(PacketError::LiteralOverflow);
        }
        value = (value << 4) | (group & 0b1111);
        if group & 0b1_0000 == 0 {
            return Ok(value);
        }
    }
}

// Sub-packets packed into exactly `length` bits. The region must end on a
// packet boundary; zero bits left over inside it are an error.
fn read_bit_delimited(
    reader: &mut BitReader,
    length: usize,
    depth: usize,
) -> Result<Vec<Packet>, PacketError> {
    let region = reader.read_slice(length)?;
    let mut sub = BitReader::with_len(region, length);
    let mut children = Vec::new();
    while !sub.is_done() {
        children.push(Packet::read_nested(&mut sub, depth)?);
    }
    if sub.remaining() != 0 {
        return Err(PacketError::MalformedPacket(format!(
            "{} unused bits at the end of a {length}-bit sub-packet region",
            sub.remaining()
        )));
    }
    Ok(children)
}
