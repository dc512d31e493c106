//! Loan repository: credit card loan deals and their ledger.
//!
//! Every ledger write ends with a reconcile of the cached status against
//! the derived outstanding principal, inside the same command, so the two
//! can never be observed out of sync.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use stockbook_core::loan::{
    LoanEntryKind, LoanLedgerService, LoanPosition, LoanStatus, PortfolioSummary,
    ReconcileOutcome, StatusProjection,
};
use stockbook_shared::types::{BankAccountId, LoanEntryId, LoanId};

use crate::entities::{Loan, LoanLedgerEntry};
use crate::store::RecordStore;

/// Error types for loan operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoanError {
    /// Loan not found.
    #[error("Loan not found: {0}")]
    LoanNotFound(LoanId),

    /// Deal numbers are unique.
    #[error("Deal number '{0}' already exists")]
    DuplicateDealNumber(String),

    /// Principal must be positive.
    #[error("Principal must be positive, got {0}")]
    NonPositivePrincipal(Decimal),

    /// Entry amounts must be positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
}

/// Input for creating a loan.
#[derive(Debug, Clone)]
pub struct NewLoan {
    /// Human-facing deal number, unique.
    pub deal_number: String,
    /// The lending institution.
    pub lender_name: String,
    /// Principal amount.
    pub principal_amount: Decimal,
    /// Annual interest rate in percent.
    pub interest_rate: Decimal,
    /// Disbursement start date.
    pub start_date: NaiveDate,
    /// Bank account the card draws on, when tracked.
    pub bank_account: Option<BankAccountId>,
}

/// Loan repository.
pub struct LoanRepository;

impl LoanRepository {
    /// Creates a loan and seeds its ledger with the initial disbursement,
    /// so the entry sum and the principal agree from day one.
    pub fn create_loan(store: &mut RecordStore, input: NewLoan) -> Result<LoanId, LoanError> {
        if input.principal_amount <= Decimal::ZERO {
            return Err(LoanError::NonPositivePrincipal(input.principal_amount));
        }
        if store
            .loans
            .values()
            .any(|loan| loan.deal_number == input.deal_number)
        {
            return Err(LoanError::DuplicateDealNumber(input.deal_number));
        }

        let id = LoanId::new();
        store.loans.insert(
            id,
            Loan {
                id,
                deal_number: input.deal_number,
                lender_name: input.lender_name,
                principal_amount: input.principal_amount,
                interest_rate: input.interest_rate,
                start_date: input.start_date,
                bank_account: input.bank_account,
                status: LoanStatus::Active,
                closed_date: None,
                created_at: Utc::now(),
            },
        );
        store.loan_entries.push(LoanLedgerEntry {
            id: LoanEntryId::new(),
            loan: id,
            kind: LoanEntryKind::Disbursement,
            amount: input.principal_amount,
            transaction_date: input.start_date,
            description: "Initial loan disbursement".to_owned(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    /// Appends one ledger entry and reconciles the cached status in the
    /// same command.
    pub fn post_entry(
        store: &mut RecordStore,
        loan: LoanId,
        kind: LoanEntryKind,
        amount: Decimal,
        transaction_date: NaiveDate,
        description: String,
        today: NaiveDate,
    ) -> Result<ReconcileOutcome, LoanError> {
        if amount <= Decimal::ZERO {
            return Err(LoanError::NonPositiveAmount(amount));
        }
        if !store.loans.contains_key(&loan) {
            return Err(LoanError::LoanNotFound(loan));
        }
        store.loan_entries.push(LoanLedgerEntry {
            id: LoanEntryId::new(),
            loan,
            kind,
            amount,
            transaction_date,
            description,
            created_at: Utc::now(),
        });
        Self::refresh_status(store, loan, today)
    }

    /// Derived position of one loan.
    pub fn position(store: &RecordStore, loan: LoanId) -> Result<LoanPosition, LoanError> {
        let record = store.loan(loan).ok_or(LoanError::LoanNotFound(loan))?;
        Ok(LoanLedgerService::position(
            record.principal_amount,
            &store.loan_entry_views(loan),
        ))
    }

    /// Reconciles the cached status/closed-date against the derived
    /// outstanding principal and applies the result.
    pub fn refresh_status(
        store: &mut RecordStore,
        loan: LoanId,
        today: NaiveDate,
    ) -> Result<ReconcileOutcome, LoanError> {
        let position = Self::position(store, loan)?;
        let record = store
            .loans
            .get_mut(&loan)
            .ok_or(LoanError::LoanNotFound(loan))?;
        let current = StatusProjection {
            status: record.status,
            closed_date: record.closed_date,
        };
        let (outcome, projection) =
            LoanLedgerService::reconcile(current, position.outstanding_principal, today);
        if outcome != ReconcileOutcome::Unchanged {
            tracing::info!(
                %loan,
                deal_number = %record.deal_number,
                ?outcome,
                outstanding = %position.outstanding_principal,
                "loan status reconciled"
            );
        }
        record.status = projection.status;
        record.closed_date = projection.closed_date;
        Ok(outcome)
    }

    /// Portfolio totals over active loans.
    #[must_use]
    pub fn portfolio_summary(store: &RecordStore) -> PortfolioSummary {
        let positions: Vec<(LoanStatus, LoanPosition)> = store
            .loans()
            .map(|loan| {
                (
                    loan.status,
                    LoanLedgerService::position(
                        loan.principal_amount,
                        &store.loan_entry_views(loan.id),
                    ),
                )
            })
            .collect();
        LoanLedgerService::portfolio(&positions)
    }
}
