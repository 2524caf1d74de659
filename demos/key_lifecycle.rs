//! Key lifecycle walkthrough.
//!
//! Issues a key, activates it on this machine, inspects it and releases the
//! activation again. Every failure is printed in its normalized form.
//!
//! # Running
//!
//! ```bash
//! export KEYWARD_API_TOKEN="your-api-token"
//! export KEYWARD_BASE_URL="http://localhost:8080"   # optional
//! export PRODUCT_ID="your-product-id"
//! cargo run --example key_lifecycle
//! ```

use keyward::{
    ActivateKeyParams, ApiError, CreateKeyParams, DeactivateKeyParams, KeyParams, LicenseGateway,
    NewCustomer,
};

#[tokio::main]
async fn main() {
    let gateway = match LicenseGateway::from_env() {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Cannot build gateway: {}", e);
            std::process::exit(1);
        }
    };
    let product_id = std::env::var("PRODUCT_ID").unwrap_or_else(|_| "demo-product".to_string());

    println!("Using {}", gateway.base_url());

    if let Err(e) = run(&gateway, &product_id).await {
        report(&e);
        std::process::exit(1);
    }
}

async fn run(gateway: &LicenseGateway, product_id: &str) -> Result<(), ApiError> {
    let created = gateway
        .create_key(
            &CreateKeyParams::new(product_id)
                .max_activations(2)
                .new_customer(NewCustomer::new("Demo Customer").email("demo@example.com"))
                .metadata_entry("source", "key_lifecycle demo"),
        )
        .await?;
    println!("Issued key {}", created.key);

    let activation = gateway
        .activate_key(
            &ActivateKeyParams::new(product_id, created.key.as_str())
                .host_id("demo-host")
                .device_tag("Demo Machine"),
        )
        .await?;
    println!("Activation: {}", activation.message);
    if let Some(name) = activation.licensee_name {
        println!("Licensed to {}", name);
    }

    let details = gateway
        .get_key(&KeyParams::new(product_id, created.key.as_str()))
        .await?;
    let license = details.data.license;
    println!(
        "{} activation(s) used, {} remaining",
        license.activations,
        license.remaining_activations()
    );
    for device in &license.devices {
        println!(
            "  - {} ({})",
            device.host_id,
            device.device_tag.as_deref().unwrap_or("untagged")
        );
    }

    let released = gateway
        .deactivate_key(&DeactivateKeyParams::new(product_id, created.key.as_str()).host_id("demo-host"))
        .await?;
    println!("Deactivation: {}", released.message);

    Ok(())
}

fn report(err: &ApiError) {
    match err.status {
        Some(status) => eprintln!("API error {} (code {}): {}", status, err.code, err.message),
        None => eprintln!("Request failed (code {}): {}", err.code, err.message),
    }
}
