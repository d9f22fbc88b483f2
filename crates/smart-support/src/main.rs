use clap::Parser;
use miette::{IntoDiagnostic, miette};
use smart_support::Field;
use smart_support::config::PageConfig;
use smart_support::form::{Submission, VerificationForm};
use smart_support::layout::Layout;
use smart_support::notify::{ConsoleNavigator, ConsoleNotifier};
use smart_support::page::VerificationPage;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Smart Support - verify your identity")]
struct Args {
    /// Backend base URL (defaults to $SMART_SUPPORT_API_URL, then http://localhost:8000)
    #[arg(long)]
    base_url: Option<String>,

    /// Viewport width in pixels, selects the wide or narrow layout
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Full name
    #[arg(short, long)]
    name: String,

    /// Mobile number, 10 digits or +91 prefixed
    #[arg(short, long)]
    contact: String,

    /// Email address
    #[arg(short, long)]
    email: String,
}

async fn draw(layout: Layout, form: &VerificationForm) -> miette::Result<()> {
    let mut out = String::new();
    layout
        .render(&form.snapshot().await, &mut out)
        .into_diagnostic()?;
    println!("{out}");
    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.base_url.as_deref() {
        Some(raw) => PageConfig::from_base_url(Some(raw))?,
        None => PageConfig::from_env()?,
    };
    let page = VerificationPage::new(
        reqwest::Client::new(),
        config,
        ConsoleNotifier,
        ConsoleNavigator,
    );
    let layout = Layout::for_width(args.width);

    // type each field, then tab out of it
    let form = page.form();
    for (field, value) in [
        (Field::Name, args.name),
        (Field::Contact, args.contact),
        (Field::Email, args.email),
    ] {
        form.set_value(field, value).await;
        let _ = form.blur(field).await;
    }
    draw(layout, &form).await?;

    match page.submit(&form).await {
        Ok(Submission::Accepted(redirect)) => {
            redirect.wait().await.into_diagnostic()?;
            Ok(())
        }
        Ok(Submission::Invalid(errors)) => {
            draw(layout, &form).await?;
            Err(miette!("{errors}"))
        }
        Ok(Submission::Ignored) => Ok(()),
        Err(e) => {
            draw(layout, &form).await?;
            Err(e.into())
        }
    }
}
