use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use facegate_client::capture::{CaptureSession, ImageFileSource};
use facegate_client::client::{FaceClient, Outcome};
use facegate_client::presenter::TerminalPresenter;
use facegate_client::transport::HttpTransport;
use facegate_client::DEFAULT_SERVER;

/// Submit a still frame to a FaceGate server for enrollment or recognition.
#[derive(Parser)]
#[command(name = "facegate")]
struct Cli {
    /// Server base URL.
    #[arg(long, default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enroll the face in IMAGE under NAME.
    Register {
        /// Name to register the face under.
        #[arg(long, default_value = "")]
        name: String,

        /// Still image standing in for the camera frame.
        #[arg(long)]
        image: PathBuf,
    },
    /// Identify every face in IMAGE and fetch a sketch of it.
    Recognize {
        /// Still image standing in for the camera frame.
        #[arg(long)]
        image: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let transport = match HttpTransport::new(&cli.server) {
        Ok(transport) => transport,
        Err(e) => {
            log::error!("Error: {e}");
            process::exit(1);
        }
    };
    let mut client = FaceClient::new(
        Box::new(transport),
        Box::new(TerminalPresenter::new(&cli.server)),
    );

    let outcome = match cli.command {
        Command::Register { name, image } => {
            let mut capture = CaptureSession::start(Box::new(ImageFileSource::new(image)));
            client.register(&name, &mut capture)
        }
        Command::Recognize { image } => {
            let mut capture = CaptureSession::start(Box::new(ImageFileSource::new(image)));
            client.recognize(&mut capture)
        }
    };

    if outcome != Outcome::Completed {
        process::exit(1);
    }
}
