use anyhow::{anyhow, Result};

use folio_core::form::WaitlistForm;
use folio_core::{AppConfig, WaitlistClient};

pub async fn run(config: &AppConfig, email: &str, fields: &[(String, String)]) -> Result<()> {
    let mut form = WaitlistForm::new();
    form.set_email(email);
    for (name, value) in fields {
        form.set_field(&config.waitlist, name, value.as_str());
    }

    let submission = form
        .prepare(&config.waitlist)
        .ok_or_else(|| anyhow!(form.error().unwrap_or("Sign-up blocked").to_string()))?;

    println!("Joining the waitlist as {}...", email);
    let client = WaitlistClient::new(&config.relay)?;
    client.post(&submission).await?;

    println!("Thank you for joining the waitlist!");
    println!("You'll be the first to hear when it launches.");
    Ok(())
}
