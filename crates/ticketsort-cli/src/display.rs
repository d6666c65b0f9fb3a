//! Terminal output for one-shot commands.

use ticketsort_ai::Resolution;
use ticketsort_core::HttpResponse;

/// Print the full response, with `body` expanded for readability.
pub fn print_response(response: &HttpResponse) -> anyhow::Result<()> {
    let body = match response.envelope() {
        Ok(envelope) => serde_json::to_value(envelope)?,
        Err(_) => serde_json::Value::String(response.body.clone()),
    };
    let out = serde_json::json!({
        "statusCode": response.status_code,
        "headers": response.headers,
        "body": body,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub fn print_resolution(resolution: &Resolution<'_>) {
    println!("{}", resolution.category.label);
    println!("  id:     {}", resolution.category.id);
    println!("  rule:   {}", resolution.rule);
    println!("  reply:  {:?}", resolution.output);
    println!("  tokens: {}", resolution.tokens_used);
}
