use std::str::FromStr;

use clap::Args;
use salessense_app::{
    database::{self, Db},
    domain::catalog::{
        CatalogService, PgCatalogService,
        data::{NewProduct, NewVariant},
        records::{ProductUuid, VariantUuid},
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Product category
    #[arg(long)]
    category: String,

    /// Variant as `label:price:stock`, price in minor units; repeatable
    #[arg(long = "variant", required = true)]
    variants: Vec<VariantArg>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VariantArg {
    label: String,
    price: u64,
    stock: u32,
}

impl FromStr for VariantArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.rsplitn(3, ':');

        let stock = parts.next().ok_or("missing stock")?;
        let price = parts.next().ok_or("expected label:price:stock")?;
        let label = parts.next().ok_or("expected label:price:stock")?;

        Ok(Self {
            label: label.trim().to_string(),
            price: price
                .trim()
                .parse()
                .map_err(|error| format!("invalid price `{price}`: {error}"))?,
            stock: stock
                .trim()
                .parse()
                .map_err(|error| format!("invalid stock `{stock}`: {error}"))?,
        })
    }
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCatalogService::new(Db::new(pool));

    let product = service
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: args.name,
            category: args.category,
            variants: args
                .variants
                .into_iter()
                .map(|variant| NewVariant {
                    uuid: VariantUuid::new(),
                    label: variant.label,
                    price: variant.price,
                    stock: variant.stock,
                })
                .collect(),
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);

    for variant in &product.variants {
        println!(
            "variant_uuid: {} label: {} price: {} stock: {}",
            variant.uuid, variant.label, variant.price, variant.stock
        );
    }

    Ok(())
}
