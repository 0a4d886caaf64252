//! Ordering scenarios across cart, search and menu

use std::time::{Duration, Instant};

use bistro::{
    cart::{Cart, NewCartLine},
    fixtures::sample_menu,
    prices::Price,
    products::{COMBO_CATEGORY, COMBO_LIMIT, CategoryId, MenuSections, ProductId},
    search::{Debouncer, ProductFilter, SearchFilterState, filter_products},
};
use rust_decimal::Decimal;
use testresult::TestResult;

#[test]
fn adding_twice_then_decrementing_floors_at_one() -> TestResult {
    let mut cart = Cart::new();
    let wagyu = NewCartLine {
        id: ProductId::new(1),
        name: "Bò Wagyu".to_string(),
        image: None,
        price: Price::parse("100,000")?,
    };

    cart.add(wagyu.clone());

    let line = cart.get(ProductId::new(1)).ok_or("missing line")?;

    assert_eq!(line.quantity.get(), 1);
    assert_eq!(line.price.amount(), Decimal::from(100_000));

    cart.add(NewCartLine {
        price: Price::from_units(1),
        ..wagyu
    });

    let line = cart.get(ProductId::new(1)).ok_or("missing line")?;

    assert_eq!(line.quantity.get(), 2);
    assert_eq!(line.price.amount(), Decimal::from(100_000));

    cart.decrement(ProductId::new(1))?;
    let quantity = cart.decrement(ProductId::new(1))?;

    assert_eq!(quantity.get(), 1);
    assert_eq!(cart.len(), 1);

    Ok(())
}

#[test]
fn category_then_search_stay_exclusive() {
    let mut state = SearchFilterState::new();

    state.set_search("bò");
    state.commit_search("bò");
    state.select_category(Some(COMBO_CATEGORY));

    assert_eq!(state.raw_search(), "");
    assert_eq!(state.filter(), ProductFilter::Category(COMBO_CATEGORY));

    state.set_search("salad");
    state.commit_search("salad");

    assert_eq!(state.category(), None);
    assert_eq!(state.filter(), ProductFilter::Search("salad".to_string()));
}

#[test]
fn typing_pause_commits_latest_text() {
    let start = Instant::now();
    let mut state = SearchFilterState::new();
    let mut debouncer = Debouncer::default();

    for (offset, text) in [(0, "b"), (120, "bò"), (260, "bò w")] {
        let now = start + Duration::from_millis(offset);

        state.set_search(text);
        debouncer.push(text.to_string(), now);

        assert_eq!(debouncer.poll(now), None);
    }

    assert_eq!(debouncer.poll(start + Duration::from_millis(759)), None);

    if let Some(text) = debouncer.poll(start + Duration::from_millis(760)) {
        state.commit_search(text);
    }

    assert_eq!(state.debounced_search(), state.raw_search());
    assert_eq!(state.filter(), ProductFilter::Search("bò w".to_string()));
}

#[test]
fn sample_menu_filters_and_sections() -> TestResult {
    let menu = sample_menu()?;

    let steaks = filter_products(&menu.products, &ProductFilter::Category(CategoryId::new(2)));
    let names: Vec<&str> = steaks.iter().map(|product| product.name.as_str()).collect();

    assert_eq!(names, vec!["Bò Wagyu", "Bò Mỹ sốt tiêu đen"]);

    let found = filter_products(&menu.products, &ProductFilter::Search("CÁ HỒI".to_string()));

    assert_eq!(found.len(), 1);

    let sections = MenuSections::build(&menu.products, COMBO_CATEGORY, COMBO_LIMIT);

    assert_eq!(sections.combos.len(), 2);
    assert!(
        sections.menu.iter().all(|product| product.status),
        "menu should only hold available products"
    );

    Ok(())
}

#[test]
fn cart_from_menu_totals_and_deposit() -> TestResult {
    let menu = sample_menu()?;
    let mut cart = Cart::new();

    for id in [201, 202, 201, 401] {
        let product = menu.product(ProductId::new(id)).ok_or("missing product")?;

        cart.add(product.into());
    }

    let totals = cart.totals();

    assert_eq!(totals.item_count, 4);
    assert_eq!(totals.amount, Decimal::from(2 * 1_250_000 + 389_000 + 55_000));
    assert_eq!(totals.deposit, totals.amount / Decimal::TWO);

    Ok(())
}

#[test]
fn corrupt_cart_json_does_not_decode() {
    let result = serde_json::from_str::<Cart>("{not json");

    assert!(result.is_err(), "expected decode error, got {result:?}");
}
