//! Balance routes.
//!
//! Expenses and settlements arrive in the request body; nothing is loaded
//! from storage.

use axum::{Json, Router, routing::post};
use billsplit_core::balance::{
    ExpenseRecord, ExpenseSplit, SettlementRecord, Transfer, compute_settled_net_balance,
    member_positions, suggest_settlements,
};
use billsplit_shared::AppError;
use billsplit_shared::types::{GroupId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::{Validate, ValidationError};

use crate::{ApiError, AppState, extractors::ValidatedJson, validation};

/// Creates the balance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/balances/net", post(net_balance))
        .route("/balances/group", post(group_balances))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// An expense in a balance request.
#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseRequest {
    /// Total paid.
    #[validate(custom(function = "validation::positive_amount"))]
    pub amount: Decimal,
    /// Who paid.
    pub paid_by: UserId,
    /// Who owes what; must add up to `amount`.
    #[validate(length(min = 1, message = "An expense needs at least one split"))]
    #[validate(nested)]
    pub splits: Vec<ExpenseSplitRequest>,
}

/// One row of an expense's splits.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ExpenseSplitRequest {
    /// Participant.
    pub user_id: UserId,
    /// Amount owed.
    #[validate(custom(function = "validation::non_negative_amount"))]
    pub amount: Decimal,
}

/// A recorded settlement in a balance request.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "distinct_parties"))]
pub struct SettlementRequest {
    /// Who paid.
    pub from: UserId,
    /// Who received.
    pub to: UserId,
    /// Amount paid.
    #[validate(custom(function = "validation::positive_amount"))]
    pub amount: Decimal,
}

fn distinct_parties(settlement: &SettlementRequest) -> Result<(), ValidationError> {
    if settlement.from == settlement.to {
        return Err(ValidationError::new("distinct_parties")
            .with_message("A settlement needs two different users".into()));
    }
    Ok(())
}

/// Request body for a pairwise balance.
#[derive(Debug, Deserialize, Validate)]
pub struct NetBalanceRequest {
    /// First user.
    pub user_a: UserId,
    /// Second user.
    pub user_b: UserId,
    /// Expenses to net.
    #[validate(nested)]
    pub expenses: Vec<ExpenseRequest>,
    /// Direct settlements between users.
    #[serde(default)]
    #[validate(nested)]
    pub settlements: Vec<SettlementRequest>,
}

/// Who owes whom in a pairwise balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceDirection {
    /// Positive balance.
    UserBOwesUserA,
    /// Negative balance.
    UserAOwesUserB,
    /// Zero balance.
    Settled,
}

impl BalanceDirection {
    fn of(balance: Decimal) -> Self {
        if balance > Decimal::ZERO {
            Self::UserBOwesUserA
        } else if balance < Decimal::ZERO {
            Self::UserAOwesUserB
        } else {
            Self::Settled
        }
    }
}

/// Response for a pairwise balance.
#[derive(Debug, Serialize)]
pub struct NetBalanceResponse {
    /// First user.
    pub user_a: UserId,
    /// Second user.
    pub user_b: UserId,
    /// Positive when B owes A, negative when A owes B.
    pub balance: Decimal,
    /// Direction of the balance.
    pub direction: BalanceDirection,
}

/// Request body for group balances.
#[derive(Debug, Deserialize, Validate)]
pub struct GroupBalancesRequest {
    /// Group the records belong to, echoed back.
    #[serde(default)]
    pub group_id: Option<GroupId>,
    /// Group expenses.
    #[validate(nested)]
    pub expenses: Vec<ExpenseRequest>,
    /// Recorded settlements.
    #[serde(default)]
    #[validate(nested)]
    pub settlements: Vec<SettlementRequest>,
}

/// A member's position.
#[derive(Debug, Serialize)]
pub struct MemberPositionResponse {
    /// Member.
    pub user_id: UserId,
    /// Positive when owed money, negative when owing.
    pub balance: Decimal,
}

/// Response for group balances.
#[derive(Debug, Serialize)]
pub struct GroupBalancesResponse {
    /// Group the records belong to.
    pub group_id: Option<GroupId>,
    /// Positions ordered by user ID.
    pub positions: Vec<MemberPositionResponse>,
    /// Suggested transfers that settle everyone up.
    pub transfers: Vec<Transfer>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Converts expense requests into records, rejecting unreconciled splits.
fn to_expense_records(expenses: Vec<ExpenseRequest>) -> Result<Vec<ExpenseRecord>, AppError> {
    expenses
        .into_iter()
        .enumerate()
        .map(|(idx, expense)| {
            let record = ExpenseRecord {
                amount: expense.amount,
                paid_by: expense.paid_by,
                splits: expense
                    .splits
                    .into_iter()
                    .map(|s| ExpenseSplit {
                        user_id: s.user_id,
                        amount: s.amount,
                    })
                    .collect(),
            };
            if record.is_reconciled() {
                Ok(record)
            } else {
                Err(AppError::Validation(format!(
                    "expense {idx}: splits sum to {} but amount is {}",
                    record.allocated(),
                    record.amount
                )))
            }
        })
        .collect()
}

fn to_settlement_records(settlements: Vec<SettlementRequest>) -> Vec<SettlementRecord> {
    settlements
        .into_iter()
        .map(|s| SettlementRecord {
            from: s.from,
            to: s.to,
            amount: s.amount,
        })
        .collect()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST `/balances/net` - Net balance between two users.
async fn net_balance(
    ValidatedJson(request): ValidatedJson<NetBalanceRequest>,
) -> Result<Json<NetBalanceResponse>, ApiError> {
    let expenses = to_expense_records(request.expenses)?;
    let settlements = to_settlement_records(request.settlements);

    let balance =
        compute_settled_net_balance(&expenses, &settlements, request.user_a, request.user_b);
    debug!(
        user_a = %request.user_a,
        user_b = %request.user_b,
        %balance,
        expenses = expenses.len(),
        "Net balance computed"
    );

    Ok(Json(NetBalanceResponse {
        user_a: request.user_a,
        user_b: request.user_b,
        balance,
        direction: BalanceDirection::of(balance),
    }))
}

/// POST `/balances/group` - Member positions and a settle-up plan.
async fn group_balances(
    ValidatedJson(request): ValidatedJson<GroupBalancesRequest>,
) -> Result<Json<GroupBalancesResponse>, ApiError> {
    let expenses = to_expense_records(request.expenses)?;
    let settlements = to_settlement_records(request.settlements);

    let positions = member_positions(&expenses, &settlements);
    let transfers = suggest_settlements(&positions);
    debug!(
        members = positions.len(),
        transfers = transfers.len(),
        "Group balances computed"
    );

    Ok(Json(GroupBalancesResponse {
        group_id: request.group_id,
        positions: positions
            .into_iter()
            .map(|(user_id, balance)| MemberPositionResponse { user_id, balance })
            .collect(),
        transfers,
    }))
}
