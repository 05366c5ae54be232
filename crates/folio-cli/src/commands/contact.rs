use anyhow::{anyhow, bail, Result};

use folio_core::form::{ContactForm, Field, SubmitOutcome};
use folio_core::{AppConfig, HttpRelay};

pub async fn run(config: &AppConfig, name: &str, email: &str, message: &str) -> Result<()> {
    let access_key = config.relay.access_key.clone().ok_or_else(|| {
        anyhow!(
            "No relay access key configured.\nSet relay.access_key in {}",
            AppConfig::config_path().display()
        )
    })?;

    let mut form = ContactForm::new(access_key);
    form.set_field(Field::Name, name);
    form.set_field(Field::Email, email);
    form.set_field(Field::Message, message);

    let relay = HttpRelay::new(&config.relay)?;
    println!("Sending message via {}...", relay.endpoint());

    match form.submit(&relay).await {
        SubmitOutcome::Sent => {
            println!("Message sent. Thanks for reaching out!");
            Ok(())
        }
        SubmitOutcome::Invalid => {
            for (field, error) in form.errors() {
                println!("  {}: {}", field.label(), error);
            }
            bail!("Message not sent, please fix the fields above")
        }
        SubmitOutcome::Failed(alert) => bail!(alert),
        SubmitOutcome::Busy => bail!("A message is already being sent"),
    }
}
