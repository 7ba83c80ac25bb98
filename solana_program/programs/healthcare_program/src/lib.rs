// Solana smart contract for the healthcare marketplace.
use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_SPECIALIZATION_LEN: usize = 64;
pub const MAX_TITLE_LEN: usize = 128;
pub const MAX_CONTENT_LEN: usize = 512;
pub const MAX_ANSWER_LEN: usize = 512;

#[program]
pub mod healthcare_program {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        let platform_state = &mut ctx.accounts.platform_state;
        platform_state.admin = ctx.accounts.authority.key();
        platform_state.doctor_count = 0;
        platform_state.question_count = 0;
        Ok(())
    }

    pub fn register_doctor(
        ctx: Context<RegisterDoctor>,
        name: String,
        specialization: String,
    ) -> Result<()> {
        require!(name.len() <= MAX_NAME_LEN, MarketplaceError::StringTooLong);
        require!(
            specialization.len() <= MAX_SPECIALIZATION_LEN,
            MarketplaceError::StringTooLong
        );

        let doctor = &mut ctx.accounts.doctor;
        doctor.authority = ctx.accounts.authority.key();
        doctor.name = name;
        doctor.specialization = specialization;
        // New doctors start unverified; only the admin flips this.
        doctor.is_verified = false;
        doctor.rating = 0;
        doctor.review_count = 0;

        ctx.accounts.platform_state.doctor_count += 1;
        Ok(())
    }

    pub fn ask_question(
        ctx: Context<AskQuestion>,
        title: String,
        content: String,
        bounty_lamports: u64,
    ) -> Result<()> {
        require!(title.len() <= MAX_TITLE_LEN, MarketplaceError::StringTooLong);
        require!(content.len() <= MAX_CONTENT_LEN, MarketplaceError::StringTooLong);

        let question = &mut ctx.accounts.question;
        question.authority = ctx.accounts.authority.key();
        question.title = title;
        question.content = content;
        question.bounty_lamports = bounty_lamports;
        question.is_answered = false;
        question.doctor = None;
        question.answer = None;

        ctx.accounts.platform_state.question_count += 1;
        Ok(())
    }

    pub fn answer_question(ctx: Context<AnswerQuestion>, answer: String) -> Result<()> {
        require!(answer.len() <= MAX_ANSWER_LEN, MarketplaceError::StringTooLong);
        require!(ctx.accounts.doctor.is_verified, MarketplaceError::DoctorNotVerified);
        require!(
            !ctx.accounts.question.is_answered,
            MarketplaceError::QuestionAlreadyAnswered
        );

        // The answered flag, the doctor reference and the answer text are
        // set together and never mutated again.
        let question = &mut ctx.accounts.question;
        question.is_answered = true;
        question.doctor = Some(ctx.accounts.doctor.key());
        question.answer = Some(answer);
        Ok(())
    }

    pub fn verify_doctor(ctx: Context<VerifyDoctor>) -> Result<()> {
        // Idempotent: re-verifying an already verified doctor succeeds.
        ctx.accounts.doctor.is_verified = true;
        Ok(())
    }
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init_if_needed,
        payer = authority,
        space = PlatformState::SPACE,
        seeds = [b"platform_state"],
        bump
    )]
    pub platform_state: Account<'info, PlatformState>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RegisterDoctor<'info> {
    #[account(init, payer = authority, space = Doctor::SPACE)]
    pub doctor: Account<'info, Doctor>,
    #[account(mut, seeds = [b"platform_state"], bump)]
    pub platform_state: Account<'info, PlatformState>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AskQuestion<'info> {
    #[account(init, payer = authority, space = Question::SPACE)]
    pub question: Account<'info, Question>,
    #[account(mut, seeds = [b"platform_state"], bump)]
    pub platform_state: Account<'info, PlatformState>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AnswerQuestion<'info> {
    #[account(mut)]
    pub question: Account<'info, Question>,
    #[account(has_one = authority)]
    pub doctor: Account<'info, Doctor>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct VerifyDoctor<'info> {
    #[account(mut)]
    pub doctor: Account<'info, Doctor>,
    #[account(
        seeds = [b"platform_state"],
        bump,
        constraint = platform_state.admin == authority.key() @ MarketplaceError::UnauthorizedAdmin
    )]
    pub platform_state: Account<'info, PlatformState>,
    pub authority: Signer<'info>,
}

#[account]
pub struct PlatformState {
    pub admin: Pubkey,
    pub doctor_count: u64,
    pub question_count: u64,
}

impl PlatformState {
    pub const SPACE: usize = 8 + 32 + 8 + 8;
}

#[account]
pub struct Doctor {
    pub authority: Pubkey,
    pub name: String,
    pub specialization: String,
    pub is_verified: bool,
    pub rating: u64,
    pub review_count: u64,
}

impl Doctor {
    pub const SPACE: usize =
        8 + 32 + (4 + MAX_NAME_LEN) + (4 + MAX_SPECIALIZATION_LEN) + 1 + 8 + 8;
}

#[account]
pub struct Question {
    pub authority: Pubkey,
    pub title: String,
    pub content: String,
    pub bounty_lamports: u64,
    pub is_answered: bool,
    pub doctor: Option<Pubkey>,
    pub answer: Option<String>,
}

impl Question {
    pub const SPACE: usize = 8
        + 32
        + (4 + MAX_TITLE_LEN)
        + (4 + MAX_CONTENT_LEN)
        + 8
        + 1
        + (1 + 32)
        + (1 + 4 + MAX_ANSWER_LEN);
}

#[error_code]
pub enum MarketplaceError {
    #[msg("Provided string exceeds its maximum length")]
    StringTooLong,
    #[msg("Doctor is not verified")]
    DoctorNotVerified,
    #[msg("Question is already answered")]
    QuestionAlreadyAnswered,
    #[msg("Only the platform admin may verify doctors")]
    UnauthorizedAdmin,
}
