// Hand-authored interface description of the healthcare program.
//
// Anchor derives every discriminator as the first 8 bytes of
// sha256("global:<instruction_name>") for instructions and
// sha256("account:<StructName>") for accounts. The byte arrays below are
// pinned so no IDL file is needed at runtime; tests re-derive them.

pub const INITIALIZE_DISCRIMINATOR: [u8; 8] = [175, 175, 109, 31, 13, 152, 155, 237];
pub const REGISTER_DOCTOR_DISCRIMINATOR: [u8; 8] = [181, 67, 216, 215, 132, 240, 147, 125];
pub const ASK_QUESTION_DISCRIMINATOR: [u8; 8] = [8, 51, 234, 216, 62, 8, 181, 243];
pub const ANSWER_QUESTION_DISCRIMINATOR: [u8; 8] = [86, 3, 30, 143, 53, 98, 98, 243];
pub const VERIFY_DOCTOR_DISCRIMINATOR: [u8; 8] = [111, 50, 94, 232, 240, 73, 14, 162];

pub const DOCTOR_ACCOUNT_DISCRIMINATOR: [u8; 8] = [162, 178, 42, 216, 185, 32, 68, 183];
pub const QUESTION_ACCOUNT_DISCRIMINATOR: [u8; 8] = [111, 22, 150, 220, 181, 122, 118, 127];
pub const PLATFORM_STATE_DISCRIMINATOR: [u8; 8] = [160, 10, 182, 134, 98, 122, 78, 239];

/// Seed of the singleton platform state PDA.
pub const PLATFORM_STATE_SEED: &[u8] = b"platform_state";

/// Derives an Anchor discriminator from its preimage, e.g.
/// `global:register_doctor` or `account:Doctor`.
pub fn derive_discriminator(preimage: &str) -> [u8; 8] {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(preimage.as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}
