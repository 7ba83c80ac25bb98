// Byte-level codec for the program's accounts and instruction arguments.
//
// The program serializes with borsh: strings are a u32 little-endian length
// followed by UTF-8 bytes, options are a one-byte tag, integers are
// little-endian, pubkeys are 32 raw bytes. Every account starts with its
// 8-byte Anchor discriminator.

use solana_program::pubkey::Pubkey;

use crate::domain::records::{DoctorRecord, QuestionRecord};
use crate::infra::solana::idl;

/// The singleton platform state account.
///
/// Account structure: 8-byte discriminator + 32-byte admin + 8-byte
/// doctor_count + 8-byte question_count.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformState {
    pub admin: String,
    pub doctor_count: u64,
    pub question_count: u64,
}

/// Decodes a doctor account.
///
/// Account structure: 8-byte discriminator + 32-byte authority + name string
/// + specialization string + 1-byte verified flag + 8-byte rating + 8-byte
/// review_count.
pub fn decode_doctor(account: &Pubkey, data: &[u8]) -> anyhow::Result<DoctorRecord> {
    let mut r = Reader::for_account(data, idl::DOCTOR_ACCOUNT_DISCRIMINATOR)?;
    Ok(DoctorRecord {
        account: account.to_string(),
        authority: r.read_pubkey()?.to_string(),
        name: r.read_string()?,
        specialization: r.read_string()?,
        is_verified: r.read_bool()?,
        rating: r.read_u64()?,
        review_count: r.read_u64()?,
    })
}

/// Decodes a question account.
///
/// Account structure: 8-byte discriminator + 32-byte authority + title
/// string + content string + 8-byte bounty + 1-byte answered flag +
/// optional 32-byte doctor + optional answer string.
pub fn decode_question(account: &Pubkey, data: &[u8]) -> anyhow::Result<QuestionRecord> {
    let mut r = Reader::for_account(data, idl::QUESTION_ACCOUNT_DISCRIMINATOR)?;
    Ok(QuestionRecord {
        account: account.to_string(),
        authority: r.read_pubkey()?.to_string(),
        title: r.read_string()?,
        content: r.read_string()?,
        bounty_lamports: r.read_u64()?,
        is_answered: r.read_bool()?,
        doctor: r.read_option_pubkey()?.map(|p| p.to_string()),
        answer: r.read_option_string()?,
    })
}

/// Decodes the platform state account.
pub fn decode_platform_state(data: &[u8]) -> anyhow::Result<PlatformState> {
    let mut r = Reader::for_account(data, idl::PLATFORM_STATE_DISCRIMINATOR)?;
    Ok(PlatformState {
        admin: r.read_pubkey()?.to_string(),
        doctor_count: r.read_u64()?,
        question_count: r.read_u64()?,
    })
}

/// Appends a borsh string (u32 LE length prefix + bytes).
pub fn put_string(out: &mut Vec<u8>, value: &str) {
    out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    out.extend_from_slice(value.as_bytes());
}

/// Appends a little-endian u64.
pub fn put_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Appends a bool as a single byte.
pub fn put_bool(out: &mut Vec<u8>, value: bool) {
    out.push(value as u8);
}

/// Appends raw pubkey bytes.
pub fn put_pubkey(out: &mut Vec<u8>, value: &Pubkey) {
    out.extend_from_slice(value.as_ref());
}

/// Appends an optional pubkey (one-byte tag + bytes when present).
pub fn put_option_pubkey(out: &mut Vec<u8>, value: Option<&Pubkey>) {
    match value {
        Some(p) => {
            out.push(1);
            put_pubkey(out, p);
        }
        None => out.push(0),
    }
}

/// Appends an optional string (one-byte tag + string when present).
pub fn put_option_string(out: &mut Vec<u8>, value: Option<&str>) {
    match value {
        Some(s) => {
            out.push(1);
            put_string(out, s);
        }
        None => out.push(0),
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Checks the 8-byte discriminator and positions the cursor after it.
    fn for_account(data: &'a [u8], discriminator: [u8; 8]) -> anyhow::Result<Self> {
        if data.len() < 8 {
            return Err(anyhow::anyhow!("account data too short for a discriminator"));
        }
        if data[..8] != discriminator {
            return Err(anyhow::anyhow!(
                "account discriminator mismatch (got {:02x?})",
                &data[..8]
            ));
        }
        Ok(Self { data, pos: 8 })
    }

    fn take(&mut self, len: usize) -> anyhow::Result<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(anyhow::anyhow!(
                "account data truncated at byte {} (wanted {} more)",
                self.pos,
                len
            ));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_pubkey(&mut self) -> anyhow::Result<Pubkey> {
        let bytes = self.take(32)?;
        let mut raw = [0u8; 32];
        raw.copy_from_slice(bytes);
        Ok(Pubkey::new_from_array(raw))
    }

    fn read_u64(&mut self) -> anyhow::Result<u64> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    fn read_u32(&mut self) -> anyhow::Result<u32> {
        let bytes = self.take(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(raw))
    }

    fn read_bool(&mut self) -> anyhow::Result<bool> {
        let bytes = self.take(1)?;
        match bytes[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(anyhow::anyhow!("invalid bool byte: {}", other)),
        }
    }

    fn read_string(&mut self) -> anyhow::Result<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    fn read_option_pubkey(&mut self) -> anyhow::Result<Option<Pubkey>> {
        if self.read_bool()? {
            Ok(Some(self.read_pubkey()?))
        } else {
            Ok(None)
        }
    }

    fn read_option_string(&mut self) -> anyhow::Result<Option<String>> {
        if self.read_bool()? {
            Ok(Some(self.read_string()?))
        } else {
            Ok(None)
        }
    }
}
