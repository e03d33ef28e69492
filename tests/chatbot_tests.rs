use roadies_chat::services::catalog::{Catalog, ProductQuery};
use roadies_chat::services::chatbot::{Intent, detect_intent, extract_max_price, generate_reply};

#[test]
fn test_detect_intent() {
    assert_eq!(detect_intent("Hello there"), Intent::Greeting);
    assert_eq!(detect_intent("what are your store hours"), Intent::GeneralChat);
    assert_eq!(
        detect_intent("Mesh riding jackets"),
        Intent::ProductSearch(ProductQuery {
            keywords: vec!["jacket".to_string(), "mesh".to_string()],
            max_price: None,
        })
    );
    assert_eq!(
        detect_intent("Any Axor lids below 3k?"),
        Intent::ProductSearch(ProductQuery {
            keywords: vec!["helmet".to_string(), "axor".to_string()],
            max_price: Some(3000.0),
        })
    );
}

#[test]
fn test_price_is_not_read_from_unrelated_numbers() {
    assert_eq!(extract_max_price("i ride a 350 cc bike"), None);
    assert_eq!(extract_max_price("under warranty?"), None);
}

#[test]
fn test_search_reply_with_products() {
    let catalog = Catalog::builtin();
    let reply = generate_reply(&catalog, &detect_intent("helmets under 5000"));

    assert!(!reply.products.is_empty());
    assert!(reply.products.iter().all(|p| p.price <= 5000.0));
    assert!(reply.reply.contains(&reply.products[0].name));
    assert!(reply.suggested_prompts.contains(&"Helmets under 3000".to_string()));
    assert!(reply.suggested_prompts.contains(&"Show jackets".to_string()));
    assert!(!reply.suggested_prompts.contains(&"Show helmets".to_string()));
}

#[test]
fn test_search_without_matches_apologises() {
    let catalog = Catalog::builtin();
    let reply = generate_reply(&catalog, &detect_intent("carbon helmet under 500"));

    assert!(reply.products.is_empty());
    assert!(reply.reply.starts_with("Sorry"));
    assert!(reply.suggested_prompts.contains(&"Show all helmets".to_string()));
}

#[test]
fn test_suggested_prompts_lead_back_to_searches() {
    let catalog = Catalog::builtin();
    let reply = generate_reply(&catalog, &detect_intent("hello"));

    for prompt in &reply.suggested_prompts {
        assert!(
            matches!(detect_intent(prompt), Intent::ProductSearch(_)),
            "prompt {prompt:?} does not search"
        );
    }
}

#[test]
fn test_try_again_asks_customer_to_repeat() {
    assert_eq!(detect_intent("  Try again "), Intent::Retry);
    assert_eq!(detect_intent("retry"), Intent::Retry);

    let reply = generate_reply(&Catalog::builtin(), &Intent::Retry);
    assert!(reply.products.is_empty());
    assert!(reply.reply.contains("type your question again"));
}
