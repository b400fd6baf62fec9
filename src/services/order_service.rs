use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set, TransactionTrait,
    sea_query::{ColumnDef, Expr, Table},
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::orders::OrderForm,
    entity::orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
    error::AppResult,
    models::Order,
    services::parse::{non_blank, parse_with_default},
};

/// Quantity used when the form leaves it out or sends garbage.
pub const DEFAULT_QTY: i32 = 1;

/// `CREATE TABLE IF NOT EXISTS orders`; a no-op once the table exists.
pub async fn ensure_orders_table<C: ConnectionTrait>(db: &C) -> AppResult<()> {
    let stmt = Table::create()
        .table(Orders)
        .if_not_exists()
        .col(
            ColumnDef::new(OrderCol::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(OrderCol::ProductId).integer().null())
        .col(ColumnDef::new(OrderCol::CustomerName).text().null())
        .col(ColumnDef::new(OrderCol::Phone).text().null())
        .col(ColumnDef::new(OrderCol::City).text().null())
        .col(ColumnDef::new(OrderCol::Address).text().null())
        .col(ColumnDef::new(OrderCol::Qty).integer().not_null().default(DEFAULT_QTY))
        .col(
            ColumnDef::new(OrderCol::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned();

    let backend = db.get_database_backend();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// Quantity from the raw form value: absent or non-numeric becomes 1, and
/// anything below 1 is raised to 1.
pub fn order_qty(raw: Option<&str>) -> i32 {
    parse_with_default(raw, DEFAULT_QTY).max(DEFAULT_QTY)
}

/// Insert one order, creating the table first if needed, in a single transaction.
pub async fn create_order<C>(db: &C, form: OrderForm) -> AppResult<Order>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    ensure_orders_table(&txn).await?;

    let product_id =
        non_blank(form.product_id.as_deref()).and_then(|raw| raw.parse::<i32>().ok());
    let qty = order_qty(form.qty.as_deref());

    let order = OrderActive {
        id: NotSet,
        product_id: Set(product_id),
        customer_name: Set(form.customer_name),
        phone: Set(form.phone),
        city: Set(form.city),
        address: Set(form.address),
        qty: Set(qty),
        created_at: Set(Utc::now()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(order_id = order.id, product_id = ?order.product_id, qty, "order created");
    Ok(Order::from(order))
}

/// One order by id. `None` when no row matches.
pub async fn get_order<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<Option<Order>> {
    ensure_orders_table(db).await?;
    let order = Orders::find_by_id(id).one(db).await?.map(Order::from);
    Ok(order)
}

/// All orders, most recent first.
pub async fn list_orders<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Order>> {
    ensure_orders_table(db).await?;
    let orders = Orders::find()
        .order_by_desc(OrderCol::CreatedAt)
        .order_by_desc(OrderCol::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qty_defaults_to_one() {
        assert_eq!(order_qty(None), 1);
        assert_eq!(order_qty(Some("")), 1);
        assert_eq!(order_qty(Some("two")), 1);
        assert_eq!(order_qty(Some("0")), 1);
        assert_eq!(order_qty(Some("-4")), 1);
        assert_eq!(order_qty(Some(" 3 ")), 3);
    }
}
