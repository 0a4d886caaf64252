use std::{io, num::NonZeroU32};

use bistro::{
    cart::{CartReceipt, NewCartLine},
    prices::Price,
    products::ProductId,
};
use bistro_app::context::AppContext;
use clap::{Args, Subcommand};

use super::report;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print the cart with its totals
    Show,

    /// Add a product, or one more of it if already in the cart
    Add(AddArgs),

    /// Increase a line by one
    Inc(LineArgs),

    /// Decrease a line by one, never below one
    Dec(LineArgs),

    /// Set the quantity of a line
    Set(SetArgs),

    /// Remove a line
    Remove(LineArgs),

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product id
    #[arg(long)]
    id: u64,

    /// Product name; looked up on the menu when omitted
    #[arg(long, requires = "price")]
    name: Option<String>,

    /// Unit price, such as 389000 or 1.250.000
    #[arg(long, requires = "name")]
    price: Option<String>,

    /// Product image URL
    #[arg(long)]
    image: Option<String>,
}

#[derive(Debug, Args)]
struct LineArgs {
    /// Product id
    #[arg(long)]
    id: u64,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Product id
    #[arg(long)]
    id: u64,

    /// New quantity, at least one
    #[arg(long)]
    quantity: NonZeroU32,
}

pub(crate) async fn run(context: &AppContext, command: CartCommand) -> Result<(), String> {
    let cart = &context.cart;

    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add(args) => {
            let line = new_line(context, args).await?;

            cart.add(line)
                .map_err(|error| report("failed to add product", &error))?;
        }
        CartSubcommand::Inc(args) => {
            cart.increment(ProductId::new(args.id))
                .map_err(|error| report("failed to update cart", &error))?;
        }
        CartSubcommand::Dec(args) => {
            cart.decrement(ProductId::new(args.id))
                .map_err(|error| report("failed to update cart", &error))?;
        }
        CartSubcommand::Set(args) => {
            cart.set_quantity(ProductId::new(args.id), args.quantity)
                .map_err(|error| report("failed to update cart", &error))?;
        }
        CartSubcommand::Remove(args) => {
            cart.remove(ProductId::new(args.id))
                .map_err(|error| report("failed to remove product", &error))?;
        }
        CartSubcommand::Clear => {
            cart.clear()
                .map_err(|error| report("failed to clear cart", &error))?;
        }
    }

    CartReceipt::new(&cart.get())
        .write_to(io::stdout().lock())
        .map_err(|error| report("failed to print cart", &error))
}

async fn new_line(context: &AppContext, args: AddArgs) -> Result<NewCartLine, String> {
    let id = ProductId::new(args.id);

    if let (Some(name), Some(price)) = (args.name, args.price) {
        let price =
            Price::parse(&price).map_err(|error| report("invalid price", &error))?;

        return Ok(NewCartLine {
            id,
            name,
            image: args.image,
            price,
        });
    }

    let products = context
        .products
        .list_products()
        .await
        .map_err(|error| report("failed to load menu", &error))?;

    products
        .iter()
        .find(|product| product.id == id)
        .map(NewCartLine::from)
        .ok_or_else(|| format!("product {id} is not on the menu"))
}
