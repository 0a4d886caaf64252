use std::{
    io::{self, Write},
    sync::Arc,
};

use bistro::{
    prices::format_vnd,
    products::{COMBO_LIMIT, CategoryId, MenuSections, Product},
    search::ProductFilter,
};
use bistro_app::{
    config::menu::MenuConfig,
    context::AppContext,
    domain::search::{FilterController, FilterStrategy},
};
use clap::Args;
use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Color, Style, object::Columns, object::Rows},
};

use super::write_failed;

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Only show products whose name or description contains this text
    #[arg(long, conflicts_with = "category")]
    search: Option<String>,

    /// Only show products in this category
    #[arg(long)]
    category: Option<u64>,

    /// Load the whole menu once and filter it locally
    #[arg(long)]
    local: bool,
}

pub(crate) async fn run(
    context: &AppContext,
    config: &MenuConfig,
    args: MenuArgs,
) -> Result<(), String> {
    let strategy = if args.local {
        FilterStrategy::FetchOnceFilterLocally
    } else {
        FilterStrategy::FetchPerFilter
    };

    let controller = FilterController::with_debounce(
        Arc::clone(&context.products),
        strategy,
        config.search_debounce(),
    );

    match (args.search, args.category) {
        (Some(text), _) => controller.submit_search(text).await,
        (None, Some(category)) => {
            controller
                .select_category(Some(CategoryId::new(category)))
                .await;
        }
        (None, None) => controller.refresh().await,
    }

    let snapshot = controller.snapshot();

    write_menu(
        io::stdout().lock(),
        &snapshot.filter,
        &snapshot.products,
        config.combo_category(),
    )
    .map_err(write_failed)
}

fn write_menu(
    mut out: impl Write,
    filter: &ProductFilter,
    products: &[Product],
    combo_category: CategoryId,
) -> io::Result<()> {
    if products.is_empty() {
        writeln!(out, "No products found for {filter}.")?;

        return Ok(());
    }

    if *filter != ProductFilter::All {
        writeln!(out, "{} products for {filter}", products.len())?;
        writeln!(out, "{}", product_table(products))?;

        return Ok(());
    }

    let sections = MenuSections::build(products, combo_category, COMBO_LIMIT);

    if !sections.combos.is_empty() {
        writeln!(out, "Combos")?;
        writeln!(out, "{}", product_table(&sections.combos))?;
    }

    writeln!(out, "Menu")?;
    writeln!(out, "{}", product_table(&sections.menu))?;

    Ok(())
}

fn product_table(products: &[Product]) -> Table {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Item", "Price"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            format_vnd(product.price.amount()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..3), Alignment::right());

    table
}
