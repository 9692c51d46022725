use chrono::{TimeZone, Utc};
use portfolio_contact::{
    entities::contact::ContactSubmission,
    mail::templates::{auto_reply_html, notification_html, notification_subject, Signature},
};

fn signature() -> Signature {
    Signature {
        name: "Site Owner".to_string(),
        title: "Software Developer".to_string(),
        linkedin_url: "https://linkedin.com/in/owner".to_string(),
        github_url: "https://github.com/owner".to_string(),
    }
}

#[test]
fn notification_escapes_submitted_markup() {
    let submission = ContactSubmission::new(
        "<script>alert(1)</script>",
        "mallory@example.com",
        "<b>urgent</b>",
        "<img src=x onerror=alert(1)>",
    )
    .validate()
    .unwrap();

    let html = notification_html(&submission, Utc::now());

    assert!(!html.contains("<script>"));
    assert!(!html.contains("<img"));
    assert!(!html.contains("<b>urgent"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&lt;b&gt;urgent"));
}

#[test]
fn notification_contains_reply_link_and_timestamp() {
    let submission = ContactSubmission::new("Ada", "ada@example.com", "Hello & welcome", "Hi")
        .validate()
        .unwrap();
    let sent_at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();

    let html = notification_html(&submission, sent_at);

    assert!(html.contains("Saturday, March 9, 2024 at 2:05 PM UTC"));
    // Subject is percent-encoded inside the mailto link
    assert!(html.contains("Re%3A%20Hello%20%26%20welcome"));
    assert!(html.contains("Reply to Ada"));
    assert!(html.starts_with("<!DOCTYPE html>"));
}

#[test]
fn notification_subject_uses_trimmed_subject() {
    let submission = ContactSubmission::new("Ada", "ada@example.com", "  Hiring  ", "Hi")
        .validate()
        .unwrap();

    assert_eq!(notification_subject(&submission), "New Contact: Hiring");
}

#[test]
fn auto_reply_greets_sender_and_signs_off() {
    let html = auto_reply_html("Ada <Lovelace>", &signature());

    assert!(html.contains("Hi <strong>Ada&#32;&lt;Lovelace&gt;</strong>"));
    assert!(html.contains("Site&#32;Owner"));
    assert!(html.contains("LinkedIn"));
    assert!(html.contains("GitHub"));
}
