use log::info;
use pcq_blocking::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let supervisor = Supervisor::new(SupervisorConfig::default(), ConsoleCallback::<i32>::new_ref());
    info!("{}", supervisor);

    match supervisor.run_until_signal() {
        Ok(report) => info!("{}", report),
        Err(e) => {
            eprintln!("SOURCE=Main; TYPE=Error; MESSAGE={}", e);
            std::process::exit(1);
        }
    }
    println!("Main thread finished.");
}
