//! # Chaosnet-class DNS messages
//!
//! Queries are assembled with `dns_parser::Builder`. Responses are walked
//! record by record here instead of with `dns_parser::Packet`, because a
//! CH-class `A` record holds a domain name and a 16-bit address, which the
//! IN-class parser rejects.

use std::str::FromStr;

use dns_parser::{Builder, Header, Name, QueryClass, QueryType, ResponseCode};
use thiserror::Error;
use tracing::trace;

use chaoshosts_common::name::{DomainName, MAX_LABEL_LEN, NameError};
use chaoshosts_common::zone::{RecordData, ResourceRecord};

pub const DNS_HDR_LEN: usize = 12;

const CLASS_CH: u16 = 3;

const TYPE_A: u16 = 1;
const TYPE_CNAME: u16 = 5;
const TYPE_SOA: u16 = 6;
const TYPE_PTR: u16 = 12;
const TYPE_HINFO: u16 = 13;
const TYPE_TXT: u16 = 16;
const TYPE_RP: u16 = 17;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("message truncated at offset {0}")]
    Truncated(usize),
    #[error("malformed name: {0}")]
    BadName(#[from] dns_parser::Error),
    #[error("invalid name in record: {0}")]
    InvalidName(#[from] NameError),
    #[error("label too long for a query: {0}")]
    LabelTooLong(String),
    #[error("query for {0} does not fit in a single message")]
    QueryTooLarge(String),
    #[error("response id {got} does not match query id {expected}")]
    IdMismatch { expected: u16, got: u16 },
    #[error("server answered {0:?}")]
    Rcode(ResponseCode),
}

/// The parts of a response this tool looks at.
#[derive(Debug)]
pub struct Response {
    pub id: u16,
    pub truncated: bool,
    pub answers: Vec<ResourceRecord>,
}

/// Which question to put in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    /// Full zone transfer, TCP only.
    Axfr,
    /// Every record the server holds for a name.
    Any,
    Txt,
}

impl Question {
    fn qtype(self) -> QueryType {
        match self {
            Question::Axfr => QueryType::AXFR,
            Question::Any => QueryType::All,
            Question::Txt => QueryType::TXT,
        }
    }
}

pub fn create_query(id: u16, name: &DomainName, question: Question) -> Result<Vec<u8>, WireError> {
    if let Some(label) = name.labels().iter().find(|l| l.len() >= MAX_LABEL_LEN) {
        // dns_parser asserts on 63-octet labels
        return Err(WireError::LabelTooLong(label.clone()));
    }

    let mut builder: Builder = Builder::new_query(id, false);
    builder.add_question(
        &name.without_final_dot(),
        false,
        question.qtype(),
        QueryClass::CH,
    );
    builder
        .build()
        .map_err(|_truncated| WireError::QueryTooLarge(name.to_string()))
}

/// Decodes the header and answer section of `message`, checking it answers query `id`.
pub fn parse_response(message: &[u8], id: u16) -> Result<Response, WireError> {
    if message.len() < DNS_HDR_LEN {
        return Err(WireError::Truncated(message.len()));
    }
    let header: Header = Header::parse(&message[..DNS_HDR_LEN])?;
    if header.id != id {
        return Err(WireError::IdMismatch {
            expected: id,
            got: header.id,
        });
    }
    if !matches!(header.response_code, ResponseCode::NoError) {
        return Err(WireError::Rcode(header.response_code));
    }

    let mut cursor: Cursor = Cursor::new(message, DNS_HDR_LEN);
    for _ in 0..header.questions {
        cursor.name()?;
        cursor.skip(4)?;
    }

    let mut answers: Vec<ResourceRecord> = Vec::with_capacity(header.answers as usize);
    for _ in 0..header.answers {
        answers.push(cursor.record()?);
    }

    Ok(Response {
        id: header.id,
        truncated: header.truncated,
        answers,
    })
}

struct Cursor<'a> {
    message: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(message: &'a [u8], pos: usize) -> Self {
        Self { message, pos }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        let end: usize = self.pos + len;
        let bytes: &[u8] = self
            .message
            .get(self.pos..end)
            .ok_or(WireError::Truncated(self.pos))?;
        self.pos = end;
        Ok(bytes)
    }

    fn skip(&mut self, len: usize) -> Result<(), WireError> {
        self.take(len).map(|_| ())
    }

    fn u16(&mut self) -> Result<u16, WireError> {
        let bytes: &[u8] = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn u32(&mut self) -> Result<u32, WireError> {
        let bytes: &[u8] = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn name(&mut self) -> Result<DomainName, WireError> {
        let rest: &[u8] = self
            .message
            .get(self.pos..)
            .ok_or(WireError::Truncated(self.pos))?;
        let name: Name = Name::scan(rest, self.message)?;
        self.pos += name.byte_len();
        to_domain_name(&name)
    }

    fn character_string(&mut self) -> Result<String, WireError> {
        let len: usize = self.take(1)?[0] as usize;
        let bytes: &[u8] = self.take(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn record(&mut self) -> Result<ResourceRecord, WireError> {
        let owner: DomainName = self.name()?;
        let rtype: u16 = self.u16()?;
        let class: u16 = self.u16()?;
        let _ttl: u32 = self.u32()?;
        let rdlen: usize = self.u16()? as usize;
        let end: usize = self.pos + rdlen;
        if end > self.message.len() {
            return Err(WireError::Truncated(self.pos));
        }

        let data: RecordData = match rtype {
            TYPE_PTR => RecordData::Ptr(self.name()?),
            TYPE_CNAME => RecordData::Cname(self.name()?),
            TYPE_SOA => {
                let _mname: DomainName = self.name()?;
                let _rname: DomainName = self.name()?;
                RecordData::Soa { serial: self.u32()? }
            }
            TYPE_HINFO => {
                let cpu: String = self.character_string()?;
                let os: String = self.character_string()?;
                RecordData::Hinfo { cpu, os }
            }
            TYPE_TXT => {
                let mut strings: Vec<String> = Vec::new();
                while self.pos < end {
                    strings.push(self.character_string()?);
                }
                RecordData::Txt(strings)
            }
            TYPE_RP => {
                let mailbox: DomainName = self.name()?;
                let txt: DomainName = self.name()?;
                RecordData::Rp { mailbox, txt }
            }
            TYPE_A if class == CLASS_CH => {
                let domain: DomainName = self.name()?;
                let address: u16 = self.u16()?;
                RecordData::ChaosA { domain, address }
            }
            _ => {
                trace!("Keeping {owner} type {rtype} class {class} opaque");
                RecordData::Other { rtype }
            }
        };

        self.pos = end;
        Ok(ResourceRecord::new(owner, data))
    }
}

fn to_domain_name(name: &Name) -> Result<DomainName, WireError> {
    let text: String = name.to_string();
    if text.is_empty() {
        return Ok(DomainName::root());
    }
    Ok(DomainName::from_str(&text)?)
}

/// Renders an RP mailbox name as an address: the first label is the user.
pub fn mailbox_to_address(mailbox: &DomainName) -> String {
    match mailbox.parent() {
        Some(domain) if !domain.is_root() => format!(
            "{}@{}",
            mailbox.first_label().unwrap_or_default(),
            domain.without_final_dot()
        ),
        _ => mailbox.without_final_dot(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
