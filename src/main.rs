use terramaze::app::App;

fn main() -> std::io::Result<()> {
    // Stdout belongs to the terminal UI, so logs go to a file.
    let file_appender = tracing_appender::rolling::never(".", "terramaze.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(if cfg!(debug_assertions) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let app = App::default();
    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let run_result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;
    run_result
}
