use mgl_blanket_shop::{
    config::AppConfig,
    db::{DbPool, create_orm_conn, create_pool, run_migrations},
};

struct SeedProduct {
    id: i32,
    name_mm: &'static str,
    name_en: &'static str,
    price: f64,
    image: &'static str,
    short_desc_mm: &'static str,
    desc_mm: &'static str,
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: 1,
        name_mm: "ဆောင်းစောင်",
        name_en: "Winter Blanket",
        price: 25000.0,
        image: "img/winter_blanket.jpg",
        short_desc_mm: "အထူ၊ နွေးထွေး",
        desc_mm: "ဆောင်းရာသီအတွက် အထူစောင်။",
    },
    SeedProduct {
        id: 2,
        name_mm: "သိုးမွှေးစောင်",
        name_en: "Wool Blanket",
        price: 38000.0,
        image: "img/wool_blanket.jpg",
        short_desc_mm: "သိုးမွှေး",
        desc_mm: "သိုးမွှေးဖြင့် ရက်လုပ်ထားသော စောင်။",
    },
    SeedProduct {
        id: 3,
        name_mm: "ချည်စောင်",
        name_en: "Cotton Blanket",
        price: 15000.0,
        image: "img/cotton_blanket.jpg",
        short_desc_mm: "ပေါ့ပါး",
        desc_mm: "နေ့စဉ်သုံး ချည်စောင်။",
    },
    SeedProduct {
        id: 4,
        name_mm: "ကလေးစောင်",
        name_en: "Baby Blanket",
        price: 12000.0,
        image: "img/baby_blanket.jpg",
        short_desc_mm: "နူးညံ့",
        desc_mm: "ကလေးငယ်များအတွက် နူးညံ့သော စောင်။",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Ensure the products table exists before inserting.
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    orm.close().await?;

    let pool = create_pool(&config.database_url).await?;
    let inserted = seed_products(&pool).await?;

    println!("Seed completed. {inserted} new product(s)");
    Ok(())
}

async fn seed_products(pool: &DbPool) -> anyhow::Result<u64> {
    let mut inserted = 0;
    for product in PRODUCTS {
        let result = sqlx::query(
            r#"
            INSERT INTO products (id, name_mm, name_en, price, image, short_desc_mm, desc_mm, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?, 1)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(product.id)
        .bind(product.name_mm)
        .bind(product.name_en)
        .bind(product.price)
        .bind(product.image)
        .bind(product.short_desc_mm)
        .bind(product.desc_mm)
        .execute(pool)
        .await?;

        inserted += result.rows_affected();
        println!("Ensured product {} ({})", product.id, product.name_en);
    }
    Ok(inserted)
}
