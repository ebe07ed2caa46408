mod util;

use crate::util::event::{Event, Events};
use clap::Parser;
use nes_core::nes_core::NesCore;
use std::collections::VecDeque;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use termion::event::Key;
use termion::input::MouseTerminal;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;
use tui::backend::TermionBackend;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, Borders, Paragraph, Wrap};
use tui::Terminal;

const BORDER_COLOR: Color = Color::Rgb(150, 150, 150);
const HISTORY_CAPACITY: usize = 512;

/// Step a loaded ROM one instruction at a time in an interactive terminal
/// viewer, showing the register file and a scrolling instruction trace.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to an iNES (.nes) ROM file
    rom: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let mut nes = NesCore::load_rom(&cli.rom)?;

    let stdout = io::stdout().into_raw_mode()?;
    let stdout = MouseTerminal::from(stdout);
    let stdout = AlternateScreen::from(stdout);
    let backend = TermionBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = Events::new();
    let registers_rect_width = 40;
    let history_rect_width = 60;
    let mut history: VecDeque<String> = VecDeque::with_capacity(HISTORY_CAPACITY);

    loop {
        terminal.draw(|frame| {
            let frame_rect = frame.size();
            let col2 = frame_rect.width.saturating_sub(registers_rect_width);
            let col1 = col2.saturating_sub(history_rect_width);
            let main_rect_height = frame_rect.height;

            let ram_rect_width = frame_rect.width - registers_rect_width - history_rect_width;
            let ram_rect = Rect::new(0, 0, ram_rect_width, main_rect_height);
            let history_rect = Rect::new(col1, 0, history_rect_width, main_rect_height);
            let registers_rect = Rect::new(col2, 0, registers_rect_width, main_rect_height);

            let block = Block::default().style(Style::default().bg(Color::Black).fg(Color::White));
            frame.render_widget(block, frame_rect);

            let create_block = |title| {
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(Color::Black).fg(BORDER_COLOR))
                    .title(Span::styled(
                        title,
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
            };

            frame.render_widget(
                Paragraph::new(get_zero_page_text(&nes))
                    .block(create_block("Zero Page RAM"))
                    .alignment(Alignment::Left),
                ram_rect,
            );

            let history_text: Vec<Spans> = history
                .iter()
                .rev()
                .map(|line| Spans::from(Span::raw(line.clone())))
                .collect();
            frame.render_widget(
                Paragraph::new(history_text)
                    .block(create_block("Trace"))
                    .alignment(Alignment::Left)
                    .wrap(Wrap { trim: true }),
                history_rect,
            );

            let registers_text = vec![
                add_register_span("PC", nes.cpu.pc),
                add_byte_span("A", nes.cpu.a),
                add_byte_span("X", nes.cpu.x),
                add_byte_span("Y", nes.cpu.y),
                add_byte_span("SP", nes.cpu.s),
                add_byte_span("P", nes.cpu.p),
                Spans::from(Span::styled(
                    "NV__DIZC",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(
                Paragraph::new(registers_text)
                    .block(create_block("CPU Registers"))
                    .alignment(Alignment::Left)
                    .wrap(Wrap { trim: true }),
                registers_rect,
            );
        })?;

        if let Event::Input(key) = events.next()? {
            match key {
                Key::Char('q') => break,
                Key::Char('n') => {
                    let event = nes.step();
                    if history.len() == HISTORY_CAPACITY {
                        history.pop_front();
                    }
                    history.push_back(event.to_string());
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn add_byte_span(name: &str, value: u8) -> Spans<'static> {
    Spans::from(vec![
        Span::styled(
            name.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(": 0x", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:02x}", value), Style::default().fg(Color::White)),
    ])
}

fn add_register_span(name: &str, value: u16) -> Spans<'static> {
    Spans::from(vec![
        Span::styled(
            name.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(": 0x", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:04x}", value), Style::default().fg(Color::White)),
    ])
}

fn get_zero_page_text(nes: &NesCore) -> Vec<Spans<'static>> {
    let mut spans = vec![];
    let mut bus = nes.bus.borrow_mut();
    let style = Style::default();
    let cyan = style.fg(Color::Rgb(0, 200, 200));
    let dim_white = style.fg(Color::Rgb(200, 200, 200));

    spans.push(Spans::from(Span::styled(
        "    0011 2233 4455 6677 8899 aabb ccdd eeff",
        style.fg(Color::Rgb(200, 100, 200)),
    )));

    for row in 0..16u16 {
        let mut parts = vec![Span::styled(format!("${:x}0 ", row), cyan)];
        for col in 0..8u16 {
            let addr = row * 16 + col * 2;
            parts.push(Span::styled(
                format!("{:04x} ", bus.read_u16(addr)),
                if col % 2 == 0 { style.fg(Color::White) } else { dim_white },
            ));
        }
        spans.push(Spans::from(parts));
    }

    spans
}
