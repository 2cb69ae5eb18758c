//! Email service for order notifications and confirmations.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Two
//! messages exist: an operator-facing notification of a new paid order and
//! a customer-facing confirmation. Callers treat sends as best-effort -
//! failures are logged at the call site and never fail the request that
//! triggered them.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::models::{Order, OrderItemDetail};

/// Display-ready data shared by both order emails.
#[derive(Debug, Clone)]
pub struct OrderMailContext {
    pub order_id: String,
    pub short_id: String,
    pub order_date: String,
    pub payment_status: String,
    pub customer_first_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_street: String,
    pub shipping_city_line: String,
    pub lines: Vec<OrderMailLine>,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

/// One itemized line in an order email.
#[derive(Debug, Clone)]
pub struct OrderMailLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl OrderMailContext {
    /// Build the context from an order and its resolved items.
    #[must_use]
    pub fn new(order: &Order, items: &[OrderItemDetail]) -> Self {
        let order_id = order.id.to_string();
        let short_id = order_id
            .chars()
            .rev()
            .take(8)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        Self {
            order_id,
            short_id,
            order_date: order.created_at.format("%B %e, %Y").to_string(),
            payment_status: order.payment_status.to_string(),
            customer_first_name: order.customer_first_name.clone(),
            customer_name: order.customer_name(),
            customer_email: order.customer_email.to_string(),
            customer_phone: order.customer_phone.clone(),
            shipping_street: order.shipping_street.clone(),
            shipping_city_line: format!(
                "{}, {} {}",
                order.shipping_city, order.shipping_state, order.shipping_zip_code
            ),
            lines: items
                .iter()
                .map(|detail| OrderMailLine {
                    name: detail.product.name.clone(),
                    quantity: detail.item.quantity,
                    unit_price: detail.item.price.to_string(),
                    line_total: detail.item.line_total().to_string(),
                })
                .collect(),
            subtotal: order.subtotal.to_string(),
            shipping: order.shipping.to_string(),
            tax: order.tax.to_string(),
            total: order.total.to_string(),
        }
    }
}

/// HTML template for the operator notification email.
#[derive(Template)]
#[template(path = "email/order_notification.html")]
struct OrderNotificationHtml<'a> {
    ctx: &'a OrderMailContext,
}

/// Plain text template for the operator notification email.
#[derive(Template)]
#[template(path = "email/order_notification.txt")]
struct OrderNotificationText<'a> {
    ctx: &'a OrderMailContext,
}

/// HTML template for the customer confirmation email.
#[derive(Template)]
#[template(path = "email/order_confirmation.html")]
struct OrderConfirmationHtml<'a> {
    ctx: &'a OrderMailContext,
}

/// Plain text template for the customer confirmation email.
#[derive(Template)]
#[template(path = "email/order_confirmation.txt")]
struct OrderConfirmationText<'a> {
    ctx: &'a OrderMailContext,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    operator_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay configuration is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            operator_address: config.operator_address.clone(),
        })
    }

    /// Send the operator-facing new-order notification.
    ///
    /// # Errors
    ///
    /// Returns error if the email fails to send or a template fails to render.
    pub async fn send_order_notification(
        &self,
        order: &Order,
        items: &[OrderItemDetail],
    ) -> Result<(), EmailError> {
        let ctx = OrderMailContext::new(order, items);
        let html = OrderNotificationHtml { ctx: &ctx }.render()?;
        let text = OrderNotificationText { ctx: &ctx }.render()?;
        let subject = format!("New Order #{} - ${}", ctx.short_id, ctx.total);

        self.send_multipart_email(&self.operator_address, &subject, &text, &html)
            .await
    }

    /// Send the customer-facing order confirmation.
    ///
    /// # Errors
    ///
    /// Returns error if the email fails to send or a template fails to render.
    pub async fn send_order_confirmation(
        &self,
        order: &Order,
        items: &[OrderItemDetail],
    ) -> Result<(), EmailError> {
        let ctx = OrderMailContext::new(order, items);
        let html = OrderConfirmationHtml { ctx: &ctx }.render()?;
        let text = OrderConfirmationText { ctx: &ctx }.render()?;
        let subject = format!("Order Confirmation #{} - LuxeCuffs", ctx.short_id);

        self.send_multipart_email(order.customer_email.as_str(), &subject, &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}
