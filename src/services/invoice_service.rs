use sea_orm::ConnectionTrait;

use crate::{
    dto::invoice::{InvoiceForm, InvoiceTotals, InvoiceView, PAYMENT_FULL_PAID, PAYMENT_ORDER_ONLY},
    error::AppResult,
    services::{
        order_service,
        parse::{non_blank, parse_amount},
        product_service,
    },
};

/// Remaining balance at or below this counts as settled (absorbs float rounding).
pub const PAID_TOLERANCE: f64 = 0.001;

pub fn is_settled(payment_mode: &str, balance: f64) -> bool {
    payment_mode == PAYMENT_FULL_PAID || balance <= PAID_TOLERANCE
}

/// Initial figures: nothing paid yet, whole total outstanding.
pub fn preview_totals(unit_price: f64, qty: i32) -> InvoiceTotals {
    let total_amount = unit_price * f64::from(qty);
    InvoiceTotals {
        qty,
        unit_price,
        total_amount,
        amount_paid: 0.0,
        balance: total_amount,
        payment_mode: PAYMENT_ORDER_ONLY.to_string(),
        is_paid: false,
    }
}

/// Figures recomputed from a submitted invoice form. Blank or unparseable
/// numbers fall back to the product price and to zero paid.
pub fn compute_totals(default_unit_price: f64, qty: i32, form: &InvoiceForm) -> InvoiceTotals {
    let unit_price = parse_amount(form.unit_price.as_deref(), default_unit_price);
    let amount_paid = parse_amount(form.amount_paid.as_deref(), 0.0);
    let payment_mode = non_blank(form.payment_mode.as_deref())
        .unwrap_or(PAYMENT_ORDER_ONLY)
        .to_string();

    let total_amount = unit_price * f64::from(qty);
    let balance = total_amount - amount_paid;
    let is_paid = is_settled(&payment_mode, balance);

    InvoiceTotals {
        qty,
        unit_price,
        total_amount,
        amount_paid,
        balance,
        payment_mode,
        is_paid,
    }
}

/// Build the invoice for an order. `form` selects recompute mode; `None` is
/// the preview. Returns `None` when the order does not exist. A missing
/// product is tolerated and prices at 0.
pub async fn build_invoice<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
    form: Option<&InvoiceForm>,
) -> AppResult<Option<InvoiceView>> {
    let Some(order) = order_service::get_order(db, order_id).await? else {
        return Ok(None);
    };

    let product = match order.product_id {
        Some(product_id) => product_service::get_product(db, product_id).await?,
        None => None,
    };
    if product.is_none() {
        tracing::debug!(
            order_id,
            product_id = ?order.product_id,
            "invoice for order without product"
        );
    }
    let default_unit_price = product.as_ref().map(|p| p.price).unwrap_or(0.0);

    let totals = match form {
        Some(form) => compute_totals(default_unit_price, order.qty, form),
        None => preview_totals(default_unit_price, order.qty),
    };

    Ok(Some(InvoiceView {
        order,
        product,
        totals,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(unit_price: &str, amount_paid: &str, payment_mode: &str) -> InvoiceForm {
        InvoiceForm {
            unit_price: Some(unit_price.into()),
            amount_paid: Some(amount_paid.into()),
            payment_mode: Some(payment_mode.into()),
        }
    }

    #[test]
    fn preview_owes_the_full_total() {
        let totals = preview_totals(5000.0, 2);
        assert_eq!(totals.total_amount, 10000.0);
        assert_eq!(totals.balance, 10000.0);
        assert_eq!(totals.amount_paid, 0.0);
        assert_eq!(totals.payment_mode, "order_only");
        assert!(!totals.is_paid);
    }

    #[test]
    fn blank_unit_price_falls_back_to_product_price() {
        let totals = compute_totals(5000.0, 2, &form("", "10000", "order_only"));
        assert_eq!(totals.unit_price, 5000.0);
        assert_eq!(totals.total_amount, 10000.0);
        assert_eq!(totals.balance, 0.0);
        assert!(totals.is_paid);
    }

    #[test]
    fn unparseable_amounts_fall_back_silently() {
        let totals = compute_totals(3000.0, 1, &form("cheap", "lots", ""));
        assert_eq!(totals.unit_price, 3000.0);
        assert_eq!(totals.amount_paid, 0.0);
        assert_eq!(totals.balance, 3000.0);
        assert_eq!(totals.payment_mode, "order_only");
        assert!(!totals.is_paid);
    }

    #[test]
    fn submitted_unit_price_overrides_product_price() {
        let totals = compute_totals(5000.0, 3, &form("4500", "1000", "order_only"));
        assert_eq!(totals.total_amount, 13500.0);
        assert_eq!(totals.balance, 12500.0);
        assert!(!totals.is_paid);
    }

    #[test]
    fn full_paid_mode_marks_paid_regardless_of_balance() {
        let totals = compute_totals(5000.0, 2, &form("", "0", "full_paid"));
        assert_eq!(totals.balance, 10000.0);
        assert!(totals.is_paid);
    }

    #[test]
    fn overpayment_is_paid_with_negative_balance() {
        let totals = compute_totals(100.0, 1, &form("", "150", "order_only"));
        assert_eq!(totals.balance, -50.0);
        assert!(totals.is_paid);
    }

    #[test]
    fn settlement_tolerance_boundary() {
        assert!(is_settled("order_only", 0.0005));
        assert!(is_settled("order_only", 0.001));
        assert!(!is_settled("order_only", 0.002));

        let just_inside = compute_totals(1.0, 1, &form("", "0.9995", "order_only"));
        assert!(just_inside.is_paid);
        let just_outside = compute_totals(1.0, 1, &form("", "0.998", "order_only"));
        assert!(!just_outside.is_paid);
    }
}
