use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity::products::{Column, Entity as Products},
    error::AppResult,
    models::Product,
};

/// Number of active products shown on the landing page.
pub const FEATURED_COUNT: usize = 3;

/// Active products, ascending id.
pub async fn list_active_products<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Product>> {
    let items = Products::find()
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();
    Ok(items)
}

/// First [`FEATURED_COUNT`] active products, or fewer if the catalogue is smaller.
pub async fn list_featured_products<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Product>> {
    let mut items = list_active_products(db).await?;
    items.truncate(FEATURED_COUNT);
    Ok(items)
}

/// Any product by id, active or not. `None` when no row matches.
pub async fn get_product<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<Option<Product>> {
    let product = Products::find_by_id(id).one(db).await?.map(Product::from);
    Ok(product)
}

/// Like [`get_product`] but hides inactive products.
pub async fn get_active_product<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> AppResult<Option<Product>> {
    Ok(get_product(db, id).await?.filter(|p| p.is_active))
}
