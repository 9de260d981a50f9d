//! Development data seeder.
//!
//! Inserts a handful of sample cases, each with one comment and one like,
//! going through the regular services so slugs and validation behave
//! exactly as they do in production.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use configs::AppConfig;
use domains::{CaseDraft, Category};
use services::{CaseService, EngagementService};
use storage_adapters::{
    connect_postgres, PgCaseRepo, PgCommentRepo, PgLikeRepo, MIGRATOR,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let pool = connect_postgres(
        config.database.url.expose_secret(),
        config.database.max_connections,
    )
    .await
    .context("connecting to postgres")?;
    MIGRATOR.run(&pool).await.context("running migrations")?;

    let case_repo = Arc::new(PgCaseRepo::new(pool.clone()));
    let cases = CaseService::new(case_repo.clone());
    let engagement = EngagementService::new(
        case_repo,
        Arc::new(PgCommentRepo::new(pool.clone())),
        Arc::new(PgLikeRepo::new(pool)),
    );

    for draft in sample_cases() {
        let case = cases.create(draft).await?;
        engagement
            .add_comment(
                case.id,
                "concerned-reader",
                "That was close. Thanks for writing it up so others can spot the pattern.",
            )
            .await?;
        engagement.toggle_like(case.id, "192.0.2.1").await?;
        tracing::info!(slug = %case.slug, "seeded case");
    }

    tracing::info!("sample data loaded");
    Ok(())
}

fn sample_cases() -> Vec<CaseDraft> {
    vec![
        CaseDraft {
            title: "Bank impersonation call asking to verify account details".to_string(),
            category: Category::VoicePhishing,
            amount: Some(500_000),
            content: "Around nine in the morning a caller introduced himself as the \
                      bank's fraud desk and said suspicious transfers had been flagged \
                      on my account. He urged me to read out my account number and PIN \
                      to stop them. The pressure and countdown made it feel real until \
                      I hung up and called the bank's published number."
                .to_string(),
            region: Some("Seoul".to_string()),
            tip: Some(
                "Banks never ask for PINs over the phone. Hang up and dial the number \
                 printed on your card instead."
                    .to_string(),
            ),
        },
        CaseDraft {
            title: "Payment alert text with a fake account security link".to_string(),
            category: Category::Smishing,
            amount: Some(0),
            content: "I received a text message styled like a wallet provider warning: \
                      'Unusual access detected on your account, verify immediately' \
                      followed by a shortened link. The landing page was a pixel-perfect \
                      login clone. Nothing was charged because I checked the official \
                      app first and saw no alert there."
                .to_string(),
            region: Some("Gyeonggi".to_string()),
            tip: Some(
                "Never open links from payment alerts. Check the official app or site \
                 directly."
                    .to_string(),
            ),
        },
        CaseDraft {
            title: "Discount shopping site that took payment and vanished".to_string(),
            category: Category::PhishingLink,
            amount: Some(1_200_000),
            content: "A heavily discounted electronics store appeared in search ads. \
                      I ordered and paid by card, got a confirmation page but never an \
                      email, and the site disappeared two days later along with the \
                      customer service number. The card company flagged two more \
                      attempted charges from the same merchant."
                .to_string(),
            region: Some("Busan".to_string()),
            tip: Some(
                "Prices far below market are the hook. Stick to retailers you can \
                 verify and enable card charge notifications."
                    .to_string(),
            ),
        },
    ]
}
