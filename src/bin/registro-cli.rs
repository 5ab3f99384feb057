use std::process::ExitCode;

use clap::Parser;
use registro_afiliados::client::RegistrationClient;
use registro_afiliados::form::{Field, FormState, RegistrationForm, SubmitRejected};

#[derive(Parser)]
#[command(name = "registro-cli")]
#[command(about = "Registro de Afiliación: submit one registration", long_about = None)]
struct Cli {
    /// Registration service root URL
    #[arg(short, long, default_value = "http://localhost:5007")]
    url: String,

    /// Electoral section (1-9999)
    #[arg(long)]
    seccion: String,

    /// CURP (18 alphanumeric characters)
    #[arg(long)]
    curp: String,

    /// Phone number (10 digits)
    #[arg(long)]
    telefono: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = RegistrationClient::new(&cli.url)?;

    let mut form = RegistrationForm::new();
    form.set(Field::Seccion, cli.seccion);
    form.set(Field::Curp, cli.curp);
    form.set(Field::Telefono, cli.telefono);

    match form.submit(&client).await {
        Ok(FormState::Success { message }) => {
            println!("{message}");
            Ok(ExitCode::SUCCESS)
        }
        Ok(FormState::Error { message }) => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
        Ok(other) => {
            eprintln!("Unexpected form state: {other:?}");
            Ok(ExitCode::FAILURE)
        }
        Err(SubmitRejected::Invalid(errors)) => {
            for error in errors {
                eprintln!("{}: {}", error.field.label(), error.message);
            }
            Ok(ExitCode::from(2))
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
