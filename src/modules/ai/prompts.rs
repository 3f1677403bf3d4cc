//! Prompt templates for the AI proxy. User-supplied values are interpolated
//! as plain text with no structural sanitization; every interpolation point
//! is in this module so a sanitization layer could be added without touching
//! the controllers.

use crate::services::gemini::ChatTurn;

pub fn describe_item() -> String {
    r#"You are an expert at analyzing items for a college rental marketplace. Analyze this image and provide a JSON response with the following structure:
{
  "title": "A catchy, descriptive title for the item (max 60 chars)",
  "description": "A detailed description of the item, its features, condition, and why someone would want to rent it (150-250 words)",
  "category": "One of: Electronics, Books, Sports, Furniture, Appliances, Clothing, Vehicles, Study Materials, Musical Instruments, Other",
  "condition": "One of: Like New, Good, Fair, Worn",
  "suggestedPrice": {
    "min": minimum suggested price per day in INR,
    "max": maximum suggested price per day in INR,
    "perDay": recommended price per day in INR
  },
  "tags": ["array", "of", "relevant", "search", "tags"]
}

Be realistic about pricing for Indian college students. Consider the item type, condition, and typical rental market rates.
Return ONLY valid JSON, no markdown or extra text."#
        .to_string()
}

pub fn suggest_price(
    item_name: &str,
    category: &str,
    condition: &str,
    original_price: Option<f64>,
) -> String {
    let price_context = original_price
        .map(|p| format!("Original purchase price: \u{20b9}{}.", p))
        .unwrap_or_default();

    format!(
        r#"You are a pricing expert for a college rental marketplace in India.
Item: {item_name}
Category: {category}
Condition: {condition}
{price_context}

Suggest a fair daily rental price in INR. Consider:
- Indian college student budgets
- Typical rental market rates
- Item depreciation and condition
- Demand for this category

Return JSON:
{{
  "min": minimum daily rental price in INR,
  "max": maximum daily rental price in INR,
  "recommended": best recommended price in INR,
  "reasoning": "Brief explanation of the pricing (1-2 sentences)"
}}

Return ONLY valid JSON."#
    )
}

pub fn verify_image(expected_category: &str) -> String {
    format!(
        r#"Analyze this image for a rental marketplace listing.
Expected category: {expected_category}

Verify:
1. Does the image show a real, rentable item?
2. Does it match the expected category?
3. Is the image quality acceptable for a listing?
4. Are there any issues (blurry, inappropriate content, stock photo, etc.)?

Return JSON:
{{
  "isValid": true/false,
  "confidence": 0-100 (how confident you are),
  "detectedCategory": "what category this actually belongs to",
  "issues": ["array of any issues found, empty if none"]
}}

Return ONLY valid JSON."#
    )
}

pub fn recommend_complements(
    item_category: &str,
    item_title: &str,
    user_history: Option<&[String]>,
) -> String {
    let history_context = match user_history {
        Some(history) if !history.is_empty() => {
            format!("User has previously rented: {}.", history.join(", "))
        }
        _ => String::new(),
    };

    format!(
        r#"You are a recommendation engine for a college rental marketplace.
{history_context}
The user is looking at: "{item_title}" in category "{item_category}".

Suggest 4-5 complementary items that students often rent together. Think about what goes well with this item.
Examples:
- Cycle -> Helmet, Lock, Pump
- Camera -> Tripod, Memory Card, Camera Bag
- Guitar -> Tuner, Picks, Capo

Return a JSON response:
{{
  "items": ["item1", "item2", "item3", "item4"],
  "reason": "Brief explanation of why these items complement the main item"
}}

Return ONLY valid JSON."#
    )
}

const CHAT_PERSONA: &str = r#"You are RentAI, a helpful assistant for a college rental marketplace called CampusRent. You help students:
- Find items to rent
- Understand how the platform works
- Get pricing advice
- Navigate listings
- Resolve common issues

Be friendly, concise, and helpful. Use casual language appropriate for college students.
Keep responses under 150 words unless more detail is needed.

Platform features:
- Students can list items for rent
- Browse categories: Electronics, Books, Sports, Furniture, etc.
- Secure wallet system for payments
- Community features for discussions
- Trust levels (Bronze, Silver, Gold) based on rental history

Common questions you can answer:
- How to rent an item
- How to list an item
- Payment and wallet info
- Trust and verification
- Pricing suggestions"#;

/// The fixed persona turns replayed before every chatbot conversation.
pub fn chat_preamble() -> Vec<ChatTurn> {
    vec![
        ChatTurn::user(CHAT_PERSONA),
        ChatTurn::model(
            "I understand! I'm RentAI, ready to help students with the CampusRent platform. \
             How can I assist you today?",
        ),
    ]
}

/// Quick replies are derived from the user's message by keyword, not from
/// the model output.
pub fn quick_replies(user_message: &str) -> Vec<String> {
    let lower = user_message.to_lowercase();

    let replies: &[&str] = if lower.contains("rent") || lower.contains("find") {
        &["Browse all items", "View categories", "Search nearby"]
    } else if lower.contains("list") || lower.contains("sell") {
        &["List an item", "View my listings", "Pricing guide"]
    } else if lower.contains("pay") || lower.contains("wallet") {
        &["Check wallet", "Add funds", "Transaction history"]
    } else {
        &["Browse items", "List an item", "View community"]
    };

    replies.iter().map(|s| s.to_string()).collect()
}
