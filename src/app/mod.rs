mod renderer;

use std::{
    io::{Stdout, Write},
    sync::mpsc,
    time::Duration,
};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    generators::generate_maze,
    maze::{Maze, MazeError, grid::GridEvent},
    solvers::{Solver, reconstruct_path, solve_maze},
};
use renderer::{Playback, Renderer};

pub struct App {
    /// Delay between carve updates when animating generation.
    carve_refresh: Duration,
    /// Initial delay between markers when replaying a traversal.
    playback_refresh: Duration,
}

impl Default for App {
    fn default() -> Self {
        Self {
            carve_refresh: Duration::from_millis(8),
            playback_refresh: Duration::from_millis(25),
        }
    }
}

impl App {
    /// Maximum number of grid events to buffer in the channel between the
    /// generation thread and the renderer.
    const MAX_EVENTS_IN_CHANNEL_BUFFER: usize = 1000;
    /// Reference maze sizing, used as the prompt default when it fits.
    const DEFAULT_WIDTH: u16 = 25;
    const DEFAULT_HEIGHT: u16 = 21;

    const CONTROLS_HINT: &'static str =
        "g: build maze   1: BFS   2: DFS   3: Dijkstra   ↑/↓: speed   Esc: quit";

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    /// even if the panic occurs in a different thread
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        let (width, height) = match App::ask_maze_dimensions(stdout)? {
            Some(dims) => dims,
            None => {
                return Ok(());
            }
        };
        tracing::info!("Starting with a {}x{} maze", width, height);

        // The prompt bounds dimensions by the terminal size, but the
        // terminal may have shrunk since.
        if !Renderer::fits_terminal(width, height)? {
            queue!(
                stdout,
                style::PrintStyledContent(
                    "Terminal is too small for that maze to display. Please resize and restart.\r\n"
                        .with(Color::Yellow)
                        .attribute(Attribute::Bold)
                ),
                style::PrintStyledContent(
                    "Press Esc to exit...\r\n"
                        .with(Color::Blue)
                        .attribute(Attribute::Bold)
                )
            )?;
            stdout.flush()?;
            App::wait_for_esc()?;
            return Ok(());
        }

        // The grid exists from startup as all walls; passages and endpoints
        // only appear once the user builds it.
        let mut maze = Maze::new(width, height, None).map_err(std::io::Error::other)?;

        let mut renderer = Renderer::new(self.playback_refresh);
        execute!(stdout, terminal::Clear(ClearType::All))?;
        renderer.draw_maze(&maze)?;
        renderer.status("Ready to build. Press g.", Color::Cyan)?;
        renderer.controls(App::CONTROLS_HINT)?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('g') => {
                    maze = self.generate(width, height, &mut renderer)?;
                    renderer.status("Maze built! Pick a solver.", Color::Green)?;
                }
                KeyCode::Char('1') => self.solve(&maze, Solver::Bfs, &mut renderer)?,
                KeyCode::Char('2') => self.solve(&maze, Solver::Dfs, &mut renderer)?,
                KeyCode::Char('3') => self.solve(&maze, Solver::Dijkstra, &mut renderer)?,
                _ => {}
            }
        }
        tracing::info!("Exiting main app loop");
        Ok(())
    }

    /// Builds a fresh maze on a worker thread while the carving streams
    /// back over the grid event channel and plays on screen.
    fn generate(&self, width: u16, height: u16, renderer: &mut Renderer) -> std::io::Result<Maze> {
        tracing::info!("Building a new {}x{} maze", width, height);
        let (grid_event_tx, grid_event_rx) =
            mpsc::sync_channel::<GridEvent>(App::MAX_EVENTS_IN_CHANNEL_BUFFER);

        let compute_thread_handle = std::thread::spawn(move || -> Result<Maze, MazeError> {
            let mut maze = Maze::new(width, height, Some(grid_event_tx))?;
            generate_maze(&mut maze, None);
            // Close the channel so the replay loop below can finish.
            maze.detach_events();
            Ok(maze)
        });

        renderer.status("Building...", Color::Cyan)?;
        let mut animate = true;
        while let Ok(event) = grid_event_rx.recv() {
            renderer.handle_grid_event(&event)?;
            if animate {
                std::thread::sleep(self.carve_refresh);
                if renderer.poll_playback_keys()? == Playback::Skipped {
                    tracing::debug!("[generate] animation skipped");
                    animate = false;
                }
            }
        }

        let maze = compute_thread_handle
            .join()
            .expect("Generation thread panicked")
            .map_err(std::io::Error::other)?;
        renderer.draw_maze(&maze)?;
        Ok(maze)
    }

    /// Runs one solver against the current maze and shows its traversal
    /// and outcome.
    fn solve(&self, maze: &Maze, solver: Solver, renderer: &mut Renderer) -> std::io::Result<()> {
        let result = match solve_maze(maze, solver) {
            Ok(result) => result,
            Err(e) => {
                tracing::info!("Solve rejected: {}", e);
                renderer.status(&format!("{}. Press g to build first.", e), Color::Yellow)?;
                return Ok(());
            }
        };

        // Redraw to clear the markers of any previous run before replaying.
        renderer.draw_maze(maze)?;
        renderer.status(&format!("{} exploring...", solver), Color::Cyan)?;
        renderer.play_visits(maze, &result)?;

        match (result.found, maze.end()) {
            (true, Some(end)) => {
                let path = reconstruct_path(maze, end, &result);
                renderer.draw_path(maze, &path)?;
                renderer.bell()?;
                renderer.status(
                    &format!(
                        "{} found a path! cost {}, {} cells, {} visited",
                        solver,
                        path.total_cost,
                        path.cells.len(),
                        result.visit_order.len()
                    ),
                    Color::Green,
                )?;
            }
            _ => {
                renderer.status(
                    &format!(
                        "{}: no path found after visiting {} cells",
                        solver,
                        result.visit_order.len()
                    ),
                    Color::Red,
                )?;
            }
        }
        Ok(())
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Largest odd value not exceeding `n`, floored at 3.
    fn odd_max(n: u16) -> u16 {
        if n % 2 == 0 { n.saturating_sub(1) } else { n }.max(3)
    }

    /// Ask user for maze dimensions (odd, at least 3, bounded by what the
    /// terminal can display)
    /// Returns None if user cancels input with Esc
    /// Returns Some((width, height)) if user inputs valid dimensions
    fn ask_maze_dimensions(stdout: &mut Stdout) -> std::io::Result<Option<(u16, u16)>> {
        stdout.execute(style::PrintStyledContent(
            "Enter odd maze dimensions (at least 3), or press Esc to exit. \
Empty input takes the default when it fits the terminal.\r\n"
                .with(Color::Blue),
        ))?;

        let validate = |s: &str, default: u16, max: u16| -> Result<u16, String> {
            let error_msg = format!("Please enter an odd number between 3 and {}.", max);
            let n = if s.trim().is_empty() {
                default
            } else {
                s.parse::<u16>().map_err(|_| error_msg.clone())?
            };
            match n {
                3..=u16::MAX if n % 2 == 1 && n <= max => Ok(n),
                _ => Err(error_msg),
            }
        };

        let (term_width, term_height) = terminal::size()?;
        let max_width = App::odd_max(term_width / crate::maze::Terrain::CELL_WIDTH);
        let max_height = App::odd_max(term_height.saturating_sub(Renderer::NUM_LOG_ROWS));
        let validate_width = |s: &str| validate(s, App::DEFAULT_WIDTH.min(max_width), max_width);
        let validate_height = |s: &str| validate(s, App::DEFAULT_HEIGHT.min(max_height), max_height);

        let width = match App::prompt_with_validation(stdout, "Width: ", validate_width)? {
            Some(w) => w,
            None => return Ok(None),
        };
        stdout.execute(style::PrintStyledContent(
            format!("Width set to {}\r\n", width)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        let height = match App::prompt_with_validation(stdout, "Height: ", validate_height)? {
            Some(h) => h,
            None => return Ok(None),
        };
        stdout.execute(style::PrintStyledContent(
            format!("Height set to {}\r\n", height)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        Ok(Some((width, height)))
    }

    /// Get user input with real-time validation and feedback
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user inputs a valid input and presses Enter, where T is the validated type
    fn prompt_with_validation<F, T>(
        stdout: &mut Stdout,
        prompt: &str,
        validate: F,
    ) -> std::io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        let mut input = String::new();
        let value = loop {
            // Re-render the prompt line, coloring the input by validity
            let validation = validate(&input);
            let input_color = if validation.is_ok() {
                Color::Green
            } else {
                Color::Red
            };
            queue!(
                stdout,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                style::PrintStyledContent(prompt.with(Color::Cyan).attribute(Attribute::Bold)),
                style::PrintStyledContent(input.clone().with(input_color)),
            )?;
            stdout.flush()?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Enter => {
                        if let Ok(value) = validation {
                            break Some(value);
                        }
                        // otherwise, stay in loop
                    }
                    KeyCode::Char(c) if !c.is_whitespace() && !c.is_control() => {
                        input.push(c);
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Esc => {
                        // User cancelled input
                        break None;
                    }
                    _ => {}
                }
            }
        };
        stdout.queue(style::Print("\r\n"))?;
        stdout.flush()?;

        Ok(value)
    }
}
