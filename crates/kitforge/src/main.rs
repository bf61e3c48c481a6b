use std::process;

use kitforge_cli::UserCancelled;

#[tokio::main]
async fn main() {
    if let Err(e) = kitforge_cli::main(std::env::args().collect::<Vec<String>>().as_slice()).await
    {
        if e.downcast_ref::<UserCancelled>().is_none() {
            eprintln!("Error: {e:#}");
        }
        process::exit(1);
    }
}
