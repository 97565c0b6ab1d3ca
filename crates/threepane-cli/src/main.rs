//! Headless demo and inspection tool for the threepane toolkit.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use threepane::dock::{
    PaneConfig, PaneSide, ThemedPaneGroup, WindowHost, WindowId, WindowOptions,
};
use threepane::platform::PlatformHandler;
use threepane::theme::ThemeManager;
use tracing::info;

#[derive(Parser)]
#[command(name = "threepane", version, about = "Dockable pane toolkit demos")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a headless docking demo and print the resulting layouts.
    Demo {
        #[arg(long = "type", value_enum, default_value_t = DemoKind::Both)]
        kind: DemoKind,
    },
    /// Print platform appearance defaults and registered themes.
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DemoKind {
    /// Three resizable panes, detach and reattach the outer ones.
    Dockable,
    /// A fixed-width left pane that ignores divider drags.
    Fixed,
    /// Both demos in sequence.
    Both,
}

/// Window host that only logs; the demos never open real windows.
struct LoggingHost {
    next_id: u64,
}

impl LoggingHost {
    fn new() -> Self {
        Self { next_id: 0 }
    }
}

impl WindowHost for LoggingHost {
    fn create_window(&mut self, opts: WindowOptions) -> WindowId {
        self.next_id += 1;
        info!(
            id = self.next_id,
            title = %opts.title,
            width = opts.size.width,
            height = opts.size.height,
            "window created"
        );
        WindowId(self.next_id)
    }

    fn close_window(&mut self, id: WindowId) {
        info!(id = id.0, "window closed");
    }

    fn set_close_intercept(&mut self, id: WindowId, intercept: bool) {
        info!(id = id.0, intercept, "close intercept updated");
    }
}

fn print_group(label: &str, group: &ThemedPaneGroup) {
    println!("{label}:");
    for side in PaneSide::ALL {
        let state = if group.is_attached(side) {
            format!(
                "attached, {:.0}px wide",
                group.pane_width(side).unwrap_or(0.0)
            )
        } else if group.is_detached(side) {
            "detached".to_string()
        } else {
            "closed".to_string()
        };
        println!("  {side:>6}: {state}");
    }
}

fn demo_dockable() -> Result<()> {
    println!("== dockable panes ==");
    let mut group = ThemedPaneGroup::builder(Box::new(LoggingHost::new()))
        .size(1024.0, 768.0)
        .pane(PaneSide::Left, PaneConfig::new().title("Navigator"), |pane| {
            pane.label("project files");
            pane.separator();
            pane.label("open editors");
        })
        .pane(PaneSide::Center, PaneConfig::center().title("Editor"), |pane| {
            pane.label("main.rs");
        })
        .pane(PaneSide::Right, PaneConfig::new().title("Inspector"), |pane| {
            pane.label("properties");
        })
        .build();
    print_group("initial", &group);

    group.detach(PaneSide::Left)?;
    print_group("after detaching left", &group);

    group.reattach(PaneSide::Left)?;
    print_group("after reattaching left", &group);
    println!(
        "left pane content was built {} times",
        group.build_count(PaneSide::Left)
    );
    Ok(())
}

fn demo_fixed() -> Result<()> {
    println!("== fixed-width pane ==");
    let mut group = ThemedPaneGroup::builder(Box::new(LoggingHost::new()))
        .size(1024.0, 768.0)
        .pane(
            PaneSide::Left,
            PaneConfig::new().title("Toolbox").fixed_width(200.0),
            |pane| {
                pane.label("tools");
            },
        )
        .build();
    print_group("initial", &group);

    let moved = group.drag_divider(threepane::dock::PaneDivider::Left, 80.0);
    println!("divider drag accepted: {moved}");
    print_group("after divider drag", &group);
    Ok(())
}

fn info() {
    let platform = PlatformHandler::new();
    let (font, font_size) = platform.ui_font();
    println!("platform: {:?}", platform.os());
    println!("icon format: .{}", platform.icon_format().extension());
    println!("ui font: {font} {font_size}pt");
    println!("accent: {}", platform.accent_color().to_hex_string());
    println!("prefers dark: {}", platform.prefers_dark());

    let themes = ThemeManager::new();
    println!("themes:");
    for name in themes.theme_names() {
        println!("  {name}");
    }
}

fn main() -> Result<()> {
    threepane_core::logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Demo { kind } => {
            if matches!(kind, DemoKind::Dockable | DemoKind::Both) {
                demo_dockable()?;
            }
            if matches!(kind, DemoKind::Fixed | DemoKind::Both) {
                demo_fixed()?;
            }
        }
        Command::Info => info(),
    }
    Ok(())
}
