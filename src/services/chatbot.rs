// src/services/chatbot.rs
use super::catalog::{Catalog, ProductQuery};
use crate::message::{ChatResponse, Product};

const CATEGORIES: [(&str, &[&str]); 3] = [
    ("helmet", &["helmet", "helmets", "lid", "lids"]),
    ("jacket", &["jacket", "jackets"]),
    ("glove", &["glove", "gloves", "gauntlet", "gauntlets"]),
];

const STYLES: [&str; 8] =
    ["full face", "open face", "modular", "dual sport", "mesh", "leather", "textile", "carbon"];

const BRANDS: [&str; 6] = ["smk", "mt", "axor", "rynox", "raida", "solace"];

const PRICE_TRIGGERS: [&str; 6] = ["under", "below", "within", "budget", "upto", "max"];

const GREETINGS: [&str; 5] = ["hi", "hello", "hey", "namaste", "yo"];

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    ProductSearch(ProductQuery),
    /// "Try again" from the widget's fallback. The failed message may never
    /// have arrived, so the customer is asked to repeat it.
    Retry,
    Greeting,
    GeneralChat,
}

pub fn detect_intent(msg: &str) -> Intent {
    let lower = msg.to_lowercase();
    if matches!(lower.trim(), "try again" | "retry") {
        return Intent::Retry;
    }
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric() && c != '₹')
        .filter(|w| !w.is_empty())
        .collect();

    let mut keywords = Vec::new();
    for (category, aliases) in CATEGORIES {
        if words.iter().any(|w| aliases.contains(w)) {
            keywords.push(category.to_string());
        }
    }
    // Only one category can be searched at a time; the first mention wins.
    keywords.truncate(1);

    for style in STYLES {
        if contains_phrase(&words, style) {
            keywords.push(style.to_string());
        }
    }
    for brand in BRANDS {
        if words.contains(&brand) {
            keywords.push(brand.to_string());
        }
    }

    if !keywords.is_empty() {
        return Intent::ProductSearch(ProductQuery { keywords, max_price: extract_max_price(&lower) });
    }
    if words.first().is_some_and(|w| GREETINGS.contains(w)) {
        return Intent::Greeting;
    }
    Intent::GeneralChat
}

fn contains_phrase(words: &[&str], phrase: &str) -> bool {
    let parts: Vec<&str> = phrase.split(' ').collect();
    words.windows(parts.len()).any(|w| w == parts.as_slice())
}

/// Reads a budget ceiling from phrasing like "under 5000", "less than ₹4,500",
/// "budget of 5k" or "3000 or less".
pub fn extract_max_price(msg: &str) -> Option<f64> {
    let tokens: Vec<&str> = msg.split_whitespace().collect();

    for (i, token) in tokens.iter().enumerate() {
        let word = token.trim_matches(|c: char| !c.is_alphanumeric());
        let prev = i.checked_sub(1).map(|p| tokens[p]).unwrap_or("");
        let trigger = PRICE_TRIGGERS.contains(&word)
            || (word == "than" && prev == "less")
            || (word == "to" && prev == "up");
        if trigger {
            let amount = tokens[i + 1..]
                .iter()
                .take(3)
                .filter(|t| !matches!(**t, "rs" | "rs." | "inr" | "of" | "₹"))
                .find_map(|t| parse_amount(t));
            if amount.is_some() {
                return amount;
            }
        }
        if matches!(word, "less" | "under" | "below") && prev == "or" && i >= 2 {
            if let Some(amount) = parse_amount(tokens[i - 2]) {
                return Some(amount);
            }
        }
    }
    None
}

fn parse_amount(token: &str) -> Option<f64> {
    let cleaned: String = token
        .trim_start_matches("rs.")
        .trim_start_matches('₹')
        .trim_end_matches(|c: char| matches!(c, '?' | '!' | '.' | ',' | '/' | '-'))
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let (digits, multiplier) = match cleaned.strip_suffix('k') {
        Some(rest) => (rest, 1000.0),
        None => (cleaned.as_str(), 1.0),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    digits.parse::<f64>().ok().map(|n| n * multiplier)
}

/// Builds the full backend answer for one user message.
pub fn generate_reply(catalog: &Catalog, intent: &Intent) -> ChatResponse {
    match intent {
        Intent::ProductSearch(query) => {
            let products = catalog.search(query);
            let reply = search_reply(query, &products);
            ChatResponse {
                reply,
                suggested_prompts: follow_ups(query, products.is_empty()),
                products,
                session_id: None,
            }
        }
        Intent::Retry => ChatResponse {
            suggested_prompts: starter_prompts(),
            ..ChatResponse::text(
                "Looks like your last message didn't reach me. Could you type your question \
                 again?",
            )
        },
        Intent::Greeting => ChatResponse {
            suggested_prompts: starter_prompts(),
            ..ChatResponse::text(
                "Hey rider! I can help you pick a certified helmet, a riding jacket or gloves. \
                 What are you shopping for?",
            )
        },
        Intent::GeneralChat => ChatResponse {
            suggested_prompts: starter_prompts(),
            ..ChatResponse::text(
                "I'm the Roadies gear advisor. Ask me about helmets, riding jackets or gloves, \
                 and tell me your budget so I can narrow it down.",
            )
        },
    }
}

fn category_of(query: &ProductQuery) -> Option<&'static str> {
    let first = query.keywords.first()?;
    CATEGORIES.iter().map(|(c, _)| *c).find(|c| *c == first.as_str())
}

fn describe(query: &ProductQuery) -> String {
    let category = category_of(query);
    let qualifiers: Vec<&str> = query
        .keywords
        .iter()
        .map(String::as_str)
        .filter(|k| Some(*k) != category)
        .collect();
    let noun = match category {
        Some(c) => format!("{c}s"),
        None => "gear".to_string(),
    };
    if qualifiers.is_empty() { noun } else { format!("{} {noun}", qualifiers.join(" ")) }
}

fn search_reply(query: &ProductQuery, products: &[Product]) -> String {
    let label = describe(query);
    let budget = query.max_price.map(|p| format!(" under ₹{p}")).unwrap_or_default();

    match products.first() {
        Some(top) => format!(
            "Here are {} {label}{budget} from our store. The {} at ₹{} is a solid pick. \
             Always check for ECE, DOT or ISI certification and a snug fit.",
            products.len(),
            top.name,
            top.price
        ),
        None => format!(
            "Sorry, I couldn't find {label}{budget} in stock right now. Look for certified \
             protection (ECE 22.06, DOT or ISI for helmets, CE Level 2 armour for jackets and \
             gloves) and consider stretching the budget a little."
        ),
    }
}

fn follow_ups(query: &ProductQuery, nothing_found: bool) -> Vec<String> {
    let category = category_of(query);
    let mut prompts = Vec::new();

    if let Some(c) = category {
        let label = capitalize(c);
        if nothing_found && query.keywords.len() > 1 {
            prompts.push(format!("Show all {c}s"));
        }
        match (nothing_found, query.max_price) {
            (true, Some(max)) => {
                prompts.push(format!("{label}s under {}", round_hundreds(max * 2.0)))
            }
            (false, Some(max)) if max > 1000.0 => {
                prompts.push(format!("{label}s under {}", round_hundreds(max * 0.6)))
            }
            (false, None) => prompts.push(format!("{label}s under 5000")),
            _ => {}
        }
    }

    for (other, _) in CATEGORIES {
        if Some(other) != category {
            prompts.push(format!("Show {other}s"));
        }
    }
    prompts
}

fn starter_prompts() -> Vec<String> {
    vec![
        "Helmets under 5000".to_string(),
        "Mesh riding jackets".to_string(),
        "Leather gloves".to_string(),
    ]
}

fn round_hundreds(value: f64) -> u64 {
    ((value / 100.0).round() * 100.0) as u64
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helmet_budget_query() {
        match detect_intent("helmets under 5000") {
            Intent::ProductSearch(q) => {
                assert_eq!(q.keywords, vec!["helmet"]);
                assert_eq!(q.max_price, Some(5000.0));
            }
            other => panic!("unexpected intent {other:?}"),
        }
    }

    #[test]
    fn amount_formats() {
        assert_eq!(extract_max_price("less than ₹4,500 please"), Some(4500.0));
        assert_eq!(extract_max_price("budget of 5k"), Some(5000.0));
        assert_eq!(extract_max_price("something 3000 or less"), Some(3000.0));
        assert_eq!(extract_max_price("up to rs 2500?"), Some(2500.0));
        assert_eq!(extract_max_price("the best helmet"), None);
    }
}
