//! Zone transfer assembly.
//!
//! An AXFR answer arrives as a sequence of TCP messages. The first record is
//! the zone's SOA and the transfer ends with the same SOA repeated.

use thiserror::Error;
use tracing::debug;

use chaoshosts_common::name::DomainName;
use chaoshosts_common::zone::{RecordData, ResourceRecord, Zone};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("transfer of {0} does not start with an SOA record")]
    MissingLeadingSoa(DomainName),
    #[error("transfer of {0} ended before the closing SOA record")]
    Incomplete(DomainName),
    #[error("message of {0} octets does not fit a TCP frame")]
    Oversized(usize),
}

/// Prefixes `message` with its two-octet length for DNS over TCP.
pub fn frame(message: &[u8]) -> Result<Vec<u8>, TransferError> {
    let len: u16 = u16::try_from(message.len()).map_err(|_| TransferError::Oversized(message.len()))?;
    let mut framed: Vec<u8> = Vec::with_capacity(message.len() + 2);
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(message);
    Ok(framed)
}

pub struct ZoneTransfer {
    origin: DomainName,
    serial: Option<u32>,
    records: Vec<ResourceRecord>,
    complete: bool,
}

impl ZoneTransfer {
    pub fn new(origin: DomainName) -> Self {
        Self {
            origin,
            serial: None,
            records: Vec::new(),
            complete: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Adds the answer section of one message. Returns `true` once the closing SOA was seen.
    pub fn push(&mut self, answers: Vec<ResourceRecord>) -> Result<bool, TransferError> {
        for record in answers {
            if self.complete {
                break;
            }
            let is_apex_soa: bool = matches!(record.data, RecordData::Soa { .. })
                && record.owner.eq_ignore_case(&self.origin);

            match (self.serial, &record.data) {
                (None, RecordData::Soa { serial }) if is_apex_soa => {
                    debug!("Transfer of {} started at serial {serial}", self.origin);
                    self.serial = Some(*serial);
                }
                (None, _) => return Err(TransferError::MissingLeadingSoa(self.origin.clone())),
                (Some(_), _) if is_apex_soa => {
                    self.complete = true;
                    continue;
                }
                (Some(_), _) => {}
            }
            self.records.push(record);
        }
        Ok(self.complete)
    }

    pub fn finish(self) -> Result<Zone, TransferError> {
        match (self.complete, self.serial) {
            (true, Some(serial)) => Ok(Zone {
                origin: self.origin,
                serial,
                records: self.records,
            }),
            _ => Err(TransferError::Incomplete(self.origin)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> DomainName {
        s.parse().unwrap()
    }

    fn soa(serial: u32) -> ResourceRecord {
        ResourceRecord::new(name("CH-ADDR.NET."), RecordData::Soa { serial })
    }

    fn ptr(owner: &str, target: &str) -> ResourceRecord {
        ResourceRecord::new(name(owner), RecordData::Ptr(name(target)))
    }

    #[test]
    fn transfer_should_span_several_messages() {
        let mut transfer: ZoneTransfer = ZoneTransfer::new(name("ch-addr.net."));
        assert_eq!(
            transfer.push(vec![soa(42), ptr("101.CH-ADDR.NET.", "FOO.CHAOSNET.NET.")]),
            Ok(false)
        );
        assert_eq!(
            transfer.push(vec![ptr("102.CH-ADDR.NET.", "FOO.CHAOSNET.NET."), soa(42)]),
            Ok(true)
        );

        let zone: Zone = transfer.finish().unwrap();
        assert_eq!(zone.serial, 42);
        assert_eq!(zone.records.len(), 3);
        assert_eq!(zone.ptr_records().count(), 2);
    }

    #[test]
    fn transfer_should_require_leading_soa() {
        let mut transfer: ZoneTransfer = ZoneTransfer::new(name("CH-ADDR.NET."));
        assert_eq!(
            transfer.push(vec![ptr("101.CH-ADDR.NET.", "FOO.CHAOSNET.NET.")]),
            Err(TransferError::MissingLeadingSoa(name("CH-ADDR.NET.")))
        );
    }

    #[test]
    fn finish_should_fail_without_closing_soa() {
        let mut transfer: ZoneTransfer = ZoneTransfer::new(name("CH-ADDR.NET."));
        transfer.push(vec![soa(1)]).unwrap();
        assert!(!transfer.is_complete());
        assert_eq!(
            transfer.finish(),
            Err(TransferError::Incomplete(name("CH-ADDR.NET.")))
        );
    }

    #[test]
    fn frame_should_prefix_length() {
        assert_eq!(frame(&[1, 2, 3]), Ok(vec![0, 3, 1, 2, 3]));
        assert_eq!(frame(&vec![0; 70_000]), Err(TransferError::Oversized(70_000)));
    }
}
