use ammonia::clean_text;
use chrono::{DateTime, Utc};

use crate::entities::contact::ValidSubmission;

/// Who signs the auto-reply and where people can find them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub title: String,
    pub linkedin_url: String,
    pub github_url: String,
}

const HEADER_GRADIENT: &str = "linear-gradient(135deg, #0EA5E9 0%, #06B6D4 100%)";
const LABEL_STYLE: &str = "margin: 0 0 8px 0; font-size: 12px; color: #64748b; text-transform: uppercase; font-weight: 600; letter-spacing: 0.5px;";
const BODY_TEXT_STYLE: &str = "margin: 0 0 20px 0; font-size: 16px; color: #1e293b; line-height: 1.6;";

pub fn notification_subject(submission: &ValidSubmission) -> String {
    format!("New Contact: {}", submission.subject)
}

pub const AUTO_REPLY_SUBJECT: &str = "Thank you for contacting me!";

/// Message sent to the site owner. Every submitted value is escaped.
pub fn notification_html(submission: &ValidSubmission, sent_at: DateTime<Utc>) -> String {
    let name = clean_text(&submission.name);
    let email = clean_text(&submission.email);
    let subject = clean_text(&submission.subject);
    let message = clean_text(&submission.message);

    let reply_href = clean_text(&format!(
        "mailto:{}?subject={}",
        submission.email,
        urlencoding::encode(&format!("Re: {}", submission.subject))
    ));
    let timestamp = sent_at.format("%A, %B %-d, %Y at %-I:%M %p UTC");

    let content = format!(
        r#"
                    <table role="presentation" style="width: 100%; border-collapse: collapse; margin-bottom: 30px;">
                      <tr>
                        <td style="padding: 15px; background-color: #f8fafc; border-left: 4px solid #0EA5E9;">
                          <p style="{LABEL_STYLE}">From</p>
                          <p style="margin: 0; font-size: 16px; color: #1e293b; font-weight: 600;">{name}</p>
                          <p style="margin: 4px 0 0 0; font-size: 14px; color: #0EA5E9;">{email}</p>
                        </td>
                      </tr>
                    </table>
                    <table role="presentation" style="width: 100%; border-collapse: collapse; margin-bottom: 30px;">
                      <tr>
                        <td style="padding: 15px; background-color: #f8fafc; border-left: 4px solid #06B6D4;">
                          <p style="{LABEL_STYLE}">Subject</p>
                          <p style="margin: 0; font-size: 16px; color: #1e293b; font-weight: 600;">{subject}</p>
                        </td>
                      </tr>
                    </table>
                    <table role="presentation" style="width: 100%; border-collapse: collapse;">
                      <tr>
                        <td style="padding: 20px; background-color: #f8fafc; border-radius: 8px; border: 1px solid #e2e8f0;">
                          <p style="{LABEL_STYLE}">Message</p>
                          <p style="margin: 0; font-size: 15px; color: #334155; line-height: 1.6; white-space: pre-wrap;">{message}</p>
                        </td>
                      </tr>
                    </table>
                    <table role="presentation" style="width: 100%; border-collapse: collapse; margin-top: 30px;">
                      <tr>
                        <td align="center">
                          <a href="{reply_href}" style="display: inline-block; padding: 14px 32px; background: {HEADER_GRADIENT}; color: #ffffff; text-decoration: none; border-radius: 6px; font-weight: 600; font-size: 14px;">Reply to {name}</a>
                        </td>
                      </tr>
                    </table>"#
    );

    let header = r#"
                    <h1 style="margin: 0; color: #ffffff; font-size: 24px; font-weight: bold;">New Contact Form Submission</h1>
                    <p style="margin: 8px 0 0 0; color: #ffffff; font-size: 14px; opacity: 0.9;">You have a new message from your portfolio website</p>"#;

    let footer = format!(
        r#"
                    <p style="margin: 0; font-size: 12px; color: #64748b; text-align: center;">This email was sent from your portfolio contact form</p>
                    <p style="margin: 8px 0 0 0; font-size: 12px; color: #94a3b8; text-align: center;">{timestamp}</p>"#
    );

    layout("New Contact Form Submission", header, &content, &footer)
}

/// Acknowledgment sent back to whoever filled in the form.
pub fn auto_reply_html(name: &str, signature: &Signature) -> String {
    let name = clean_text(name);
    let owner = clean_text(&signature.name);
    let title = clean_text(&signature.title);
    let linkedin = clean_text(&signature.linkedin_url);
    let github = clean_text(&signature.github_url);

    let content = format!(
        r#"
                    <p style="{BODY_TEXT_STYLE}">Hi <strong>{name}</strong>,</p>
                    <p style="{BODY_TEXT_STYLE}">Thank you for reaching out! I've received your message and really appreciate you taking the time to contact me.</p>
                    <p style="{BODY_TEXT_STYLE}">I'll review your message and get back to you as soon as possible, typically within 24-48 hours.</p>
                    <table role="presentation" style="width: 100%; border-collapse: collapse; margin: 30px 0;">
                      <tr>
                        <td style="padding: 20px; background-color: #f0f9ff; border-left: 4px solid #0EA5E9; border-radius: 4px;">
                          <p style="margin: 0; font-size: 14px; color: #0369a1; line-height: 1.6;"><strong>In the meantime:</strong><br>Feel free to check out my portfolio to learn more about my work and experience.</p>
                        </td>
                      </tr>
                    </table>
                    <p style="margin: 20px 0 0 0; font-size: 16px; color: #1e293b; line-height: 1.6;">
                      Best regards,<br>
                      <strong style="color: #0EA5E9;">{owner}</strong><br>
                      <span style="font-size: 14px; color: #64748b;">{title}</span>
                    </p>
                    <table role="presentation" style="width: 100%; border-collapse: collapse; margin-top: 30px; padding-top: 30px; border-top: 1px solid #e2e8f0;">
                      <tr>
                        <td align="center">
                          <p style="margin: 0 0 15px 0; font-size: 14px; color: #64748b;">Connect with me:</p>
                          <a href="{linkedin}" style="text-decoration: none; color: #0A66C2; font-size: 14px; font-weight: 600;">LinkedIn</a>
                          <span style="padding: 0 8px; color: #cbd5e1;">|</span>
                          <a href="{github}" style="text-decoration: none; color: #1e293b; font-size: 14px; font-weight: 600;">GitHub</a>
                        </td>
                      </tr>
                    </table>"#
    );

    let header = r#"
                    <h1 style="margin: 0; color: #ffffff; font-size: 28px; font-weight: bold; text-align: center;">Message Received!</h1>"#;

    let footer = r#"
                    <p style="margin: 0; font-size: 12px; color: #94a3b8; text-align: center;">This is an automated confirmation email. Please do not reply directly to this message.</p>"#;

    layout("Thank You for Contacting Me", header, &content, footer)
}

fn layout(title: &str, header: &str, content: &str, footer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
  </head>
  <body style="margin: 0; padding: 0; font-family: 'Arial', sans-serif; background-color: #f4f4f4;">
    <table role="presentation" style="width: 100%; border-collapse: collapse;">
      <tr>
        <td align="center" style="padding: 40px 0;">
          <table role="presentation" style="width: 600px; border-collapse: collapse; background-color: #ffffff; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);">
            <tr>
              <td style="padding: 40px 30px; background: {HEADER_GRADIENT};">{header}
              </td>
            </tr>
            <tr>
              <td style="padding: 40px 30px;">{content}
              </td>
            </tr>
            <tr>
              <td style="padding: 20px 30px; background-color: #f8fafc; border-top: 1px solid #e2e8f0;">{footer}
              </td>
            </tr>
          </table>
        </td>
      </tr>
    </table>
  </body>
</html>
"#
    )
}
