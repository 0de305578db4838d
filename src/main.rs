use std::process::ExitCode;

fn main() -> ExitCode {
    comsel::boot::init_common();
    let matches = comsel::boot::build_cli().get_matches();

    match comsel::boot::run(&matches) {
        Ok(code) => code,
        Err(err) => {
            log::error!("comsel failed: {err:#}");
            eprintln!("comsel: {err:#}");
            ExitCode::from(2)
        }
    }
}
