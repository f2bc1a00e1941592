use crate::config::SmtpConfig;
use crate::entities::{client_entity, order_entity};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// Outbound admin notifications over SMTP.
///
/// Sending is strictly best-effort: the order flow never waits on the relay
/// and never sees a delivery failure.
#[derive(Clone)]
pub struct Mailer {
    smtp: SmtpConfig,
    notification_email: Option<String>,
}

impl Mailer {
    pub fn new(smtp: SmtpConfig, notification_email: Option<String>) -> Self {
        Self {
            smtp,
            notification_email,
        }
    }

    /// Notify the administrator that a new order arrived.
    pub fn notify_new_order(&self, order: &order_entity::Model, client: &client_entity::Model) {
        let Some(recipient) = self.notification_email.clone() else {
            log::info!(
                "New order #{} for {} from {}. Set ADMIN_NOTIFICATION_EMAIL to receive email alerts.",
                order.id,
                order.platform,
                client.phone
            );
            return;
        };

        if !self.smtp.is_configured() {
            log::warn!("Cannot send order notification: SMTP settings missing");
            return;
        }

        let subject = format!("Nuevo pedido: {} solicita {}", client.name, order.platform);
        let body = format!(
            "Hola!\n\n\
             El cliente {} ({}) confirmó el pago del servicio {}.\n\
             Ingresa al panel de administración para verificar y asignar una cuenta.",
            client.name, client.phone, order.platform
        );

        let smtp = self.smtp.clone();
        let order_id = order.id;
        // lettre's SmtpTransport blocks, so deliver off the request path.
        tokio::task::spawn_blocking(move || {
            match send_plain_text(&smtp, &recipient, &subject, &body) {
                Ok(()) => log::info!("Order notification sent for order #{order_id}"),
                Err(e) => log::error!("Failed to send order notification: {e}"),
            }
        });
    }
}

fn send_plain_text(smtp: &SmtpConfig, to: &str, subject: &str, body: &str) -> Result<(), String> {
    let from = if smtp.from_email.is_empty() {
        "noreply@example.com"
    } else {
        smtp.from_email.as_str()
    };

    let email = Message::builder()
        .from(
            from.parse()
                .map_err(|e| format!("Invalid from address: {e}"))?,
        )
        .to(to.parse().map_err(|e| format!("Invalid to address: {e}"))?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| format!("Failed to build email: {e}"))?;

    let transport = if smtp.username.is_empty() {
        // Unauthenticated local relay
        SmtpTransport::builder_dangerous(&smtp.server)
            .port(smtp.port)
            .build()
    } else {
        SmtpTransport::starttls_relay(&smtp.server)
            .map_err(|e| format!("Failed to create SMTP transport: {e}"))?
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .build()
    };

    transport
        .send(&email)
        .map_err(|e| format!("Failed to send email: {e}"))?;

    Ok(())
}
