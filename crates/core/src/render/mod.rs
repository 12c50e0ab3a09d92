//! Frame composition plus the stock [`StepRenderer`] implementations.

use std::io::Write;

use crate::{
    audio::tone_rate, Highlight, Palette, Phase, PlaybackSession, Result, Step, StepRenderer,
};

/// How a single bar is drawn in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStyle {
    Unsorted,
    /// The bar the active one was compared with or moved from.
    Selected,
    /// The bar that was just written; its height drives the tone.
    Active,
    Sorted,
}

impl BarStyle {
    fn glyph(self) -> char {
        match self {
            BarStyle::Unsorted => '|',
            BarStyle::Selected => '+',
            BarStyle::Active => '*',
            BarStyle::Sorted => '=',
        }
    }

    fn colour(self, palette: &Palette) -> &str {
        match self {
            BarStyle::Unsorted => &palette.unsorted,
            BarStyle::Selected => &palette.selected,
            BarStyle::Active | BarStyle::Sorted => &palette.sorted,
        }
    }
}

/// Styles every bar of `values` for `step`.
///
/// During the sweep every bar up to and including the confirmed one stays
/// marked as sorted, so the confirmation grows from left to right.
pub fn compose_frame(values: &[u32], step: &Step) -> Vec<BarStyle> {
    (0..values.len())
        .map(|index| match step.highlight {
            Highlight::Selected if index == step.primary => BarStyle::Active,
            Highlight::Selected if index == step.secondary => BarStyle::Selected,
            Highlight::Sorted if index <= step.primary => BarStyle::Sorted,
            _ => BarStyle::Unsorted,
        })
        .collect()
}

/// Draws frames as text columns and sounds the step's tone through an
/// optional playback session.
pub struct TextRenderer<W: Write> {
    out: W,
    rows: usize,
    max_height: u32,
    palette: Option<Palette>,
    clear_screen: bool,
    session: Option<PlaybackSession>,
}

impl<W: Write> TextRenderer<W> {
    /// `max_height` is the value that fills all `rows`.
    pub fn new(out: W, rows: usize, max_height: u32) -> Self {
        Self {
            out,
            rows: rows.max(1),
            max_height: max_height.max(1),
            palette: None,
            clear_screen: false,
            session: None,
        }
    }

    /// Colours bars with 24-bit ANSI escapes taken from `palette`.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Moves the cursor home and clears the terminal before every frame.
    pub fn clearing(mut self) -> Self {
        self.clear_screen = true;
        self
    }

    pub fn with_session(mut self, session: PlaybackSession) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn scaled(&self, value: u32) -> usize {
        let rows = self.rows as u64;
        let scaled = (u64::from(value) * rows).div_ceil(u64::from(self.max_height));
        scaled.min(rows) as usize
    }

    fn draw(&mut self, values: &[u32], styles: &[BarStyle]) -> Result<()> {
        let mut frame = String::new();
        if self.clear_screen {
            frame.push_str("\x1b[H\x1b[2J");
        }

        let heights: Vec<usize> = values.iter().map(|&value| self.scaled(value)).collect();
        for row in (1..=self.rows).rev() {
            for (height, style) in heights.iter().zip(styles) {
                if *height < row {
                    frame.push(' ');
                    continue;
                }
                match self.palette.as_ref().and_then(|p| ansi_colour(style.colour(p))) {
                    Some(escape) => {
                        frame.push_str(&escape);
                        frame.push('#');
                        frame.push_str("\x1b[0m");
                    }
                    None => frame.push(style.glyph()),
                }
            }
            frame.push('\n');
        }

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> StepRenderer for TextRenderer<W> {
    fn render(&mut self, values: &[u32], step: &Step) -> Result<()> {
        let styles = compose_frame(values, step);
        self.draw(values, &styles)?;

        if step.tone {
            let value = values.get(step.primary).copied();
            if let (Some(session), Some(value)) = (self.session.as_mut(), value) {
                session.play(tone_rate(value, self.max_height));
            }
        }
        Ok(())
    }
}

/// Converts `#rrggbb` into a 24-bit foreground escape.
fn ansi_colour(hex: &str) -> Option<String> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    let (r, g, b) = (channel(0..2)?, channel(2..4)?, channel(4..6)?);
    Some(format!("\x1b[38;2;{r};{g};{b}m"))
}

/// A step together with the sequence as it looked when the step was drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub step: Step,
    pub values: Vec<u32>,
}

/// Renderer that stores every frame it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    frames: Vec<RecordedFrame>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    /// `(primary, secondary)` of every algorithm step, in emission order.
    pub fn index_pairs(&self) -> Vec<(usize, usize)> {
        self.frames
            .iter()
            .filter(|frame| frame.step.phase == Phase::Algorithm)
            .map(|frame| (frame.step.primary, frame.step.secondary))
            .collect()
    }

    pub fn count(&self, phase: Phase) -> usize {
        self.frames
            .iter()
            .filter(|frame| frame.step.phase == phase)
            .count()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl StepRenderer for RecordingRenderer {
    fn render(&mut self, values: &[u32], step: &Step) -> Result<()> {
        self.frames.push(RecordedFrame {
            step: step.clone(),
            values: values.to_vec(),
        });
        Ok(())
    }
}
