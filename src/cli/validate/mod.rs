//! Validate command - checks user fields without touching storage

use clap::Args;

use crate::domain::user::collect_violations;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Display name of the user
    #[arg(long)]
    pub name: String,

    /// Email address of the user
    #[arg(long)]
    pub email: String,
}

/// Print `valid`, or every violated rule and fail
pub async fn run(args: ValidateArgs) -> anyhow::Result<()> {
    super::bootstrap();

    let violations = collect_violations(&args.name, &args.email);

    if violations.is_empty() {
        println!("valid");
        return Ok(());
    }

    for violation in &violations {
        println!("{}: {}", violation.field(), violation);
    }

    anyhow::bail!("{} validation error(s)", violations.len())
}
