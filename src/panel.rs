//! The game's panels, each built on one or more [`TextBuffer`]s.
//!
//! The set of panels is fixed, so [`Panel`] is a closed enum and every
//! operation is a single `match`. Panels never talk to the scripting engine
//! or the file system themselves; anything that needs the application shell
//! is returned from [`Panel::update`] as a [`PanelEvent`].

use crate::backend::{Canvas, FontHandle, Input, Rect};
use crate::config::Config;
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::highlight::{Grammar, SyntaxParser};
use crate::input::{Key, KeyModifiers};
use crate::level::{CubeData, LevelData};
use crate::script::{VoxelScript, evaluate_cube};
use crate::text::TextBuffer;

pub const EDITOR_NAME: &str = "editor";
pub const LEVELS_NAME: &str = "levels";
pub const HELP_NAME: &str = "help";
pub const CONFIG_NAME: &str = "config";

/// Fraction of a panel's size left as margin around its buffers.
const MARGIN: f32 = 0.05;

/// Prefix of every level entry in the level list.
const LEVEL_ENTRY: &str = " - ";

/// Lines above the first level entry in the level list.
const LEVEL_LIST_HEADER: usize = 2;

pub const HELP_TEXT: &str = "\
# cubecode

Write small scripts that paint the cells of a 3D grid until it matches the
shape of the level.

# Levels
Move the cursor onto the line with a level's name and press <Enter> to load
it into the editor.

# Editor
Write your script in the left buffer. It runs once per cell with the cell
position in [x], [y] and [z] and the grid size in [X], [Y] and [Z], and must
set [Color] to a palette color or a 0xRRGGBBAA value. Errors and completion
messages appear in the buffer on the right.

## Keys
(C stands for Control)
 - <C-k> move up
 - <C-j> move down
 - <C-h> move left
 - <C-l> move right
 - <C-w> jump one word forward
 - <C-b> jump one word backward
 - <C-a> jump to the start of the line
 - <C-e> jump to the end of the line
 - <C-t> jump to the top of the buffer
 - <C-g> jump to the bottom of the buffer
 - <C-c> copy, <C-x> cut, <C-v> paste
 - <C-=> and <C--> change the font size

Press <Shift-Enter> to run the script.

# Configuration
Edit the settings in the config panel and press <Shift-Enter> to apply them.
<C-r> restores the defaults.
";

/// Something a panel asks the application shell to do.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelEvent {
    /// Run the editor's script.
    RunScript,
    /// Load the level at this index of the level list.
    LoadLevel(usize),
    /// Apply a new configuration to every panel.
    ReloadConfig(Config),
}

/// A top-level panel of the game window.
#[derive(Debug)]
pub enum Panel {
    Editor(EditorPanel),
    Levels(LevelsPanel),
    Help(HelpPanel),
    Config(ConfigPanel),
}

impl Panel {
    /// Tab name of the panel.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Editor(_) => EDITOR_NAME,
            Self::Levels(_) => LEVELS_NAME,
            Self::Help(_) => HELP_NAME,
            Self::Config(_) => CONFIG_NAME,
        }
    }

    /// Handle one frame of input.
    pub fn update(&mut self, input: &mut dyn Input) -> Option<PanelEvent> {
        match self {
            Self::Editor(p) => p.update(input),
            Self::Levels(p) => p.update(input),
            Self::Help(p) => {
                p.buffer.update(input);
                None
            }
            Self::Config(p) => p.update(input),
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Self::Editor(p) => {
                p.code.draw(canvas);
                p.output.draw(canvas);
            }
            Self::Levels(p) => p.list.draw(canvas),
            Self::Help(p) => p.buffer.draw(canvas),
            Self::Config(p) => p.buffer.draw(canvas),
        }
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        match self {
            Self::Editor(p) => p.set_bounds(bounds),
            Self::Levels(p) => p.list.set_bounds(inset(bounds)),
            Self::Help(p) => p.buffer.set_bounds(inset(bounds)),
            Self::Config(p) => p.buffer.set_bounds(inset(bounds)),
        }
    }

    /// Apply a new configuration.
    pub fn on_config_reload(&mut self, config: &Config) {
        match self {
            Self::Editor(p) => p.on_config_reload(config),
            Self::Levels(p) => apply_look(&mut p.list, config),
            Self::Help(p) => {
                apply_look(&mut p.buffer, config);
                p.buffer
                    .set_syntax_parser(parser_for(Grammar::Markup, config));
            }
            Self::Config(p) => {
                apply_look(&mut p.buffer, config);
                p.buffer.set_wrap_lines(config.wrap_lines);
            }
        }
    }
}

/// Shrink `bounds` by the panel margin, keeping it centered.
fn inset(bounds: Rect) -> Rect {
    let mw = bounds.width * MARGIN;
    let mh = bounds.height * MARGIN;
    Rect::new(
        bounds.x + mw / 2.0,
        bounds.y + mh / 2.0,
        bounds.width - mw,
        bounds.height - mh,
    )
}

fn apply_look(buffer: &mut TextBuffer, config: &Config) {
    buffer.set_foreground(config.foreground_color);
    buffer.set_background(config.background_color);
    buffer.set_font_size(config.font_size);
}

fn parser_for(grammar: Grammar, config: &Config) -> Option<SyntaxParser> {
    config
        .syntax_highlighting
        .then(|| SyntaxParser::new(grammar, config.foreground_color))
}

fn shift_enter(input: &dyn Input) -> bool {
    input.modifiers().contains(KeyModifiers::SHIFT)
        && (input.is_key_pressed(Key::Enter) || input.is_key_pressed(Key::KpEnter))
}

fn enter(input: &dyn Input) -> bool {
    input.is_key_pressed(Key::Enter) || input.is_key_pressed(Key::KpEnter)
}

/// Script editor: the code buffer on the left, script output on the right.
#[derive(Debug)]
pub struct EditorPanel {
    pub code: TextBuffer,
    pub output: TextBuffer,
    cube: CubeData,
}

impl EditorPanel {
    #[must_use]
    pub fn new(font: &FontHandle, bounds: Rect) -> Self {
        let mut code = TextBuffer::new(FontHandle::clone(font), bounds);
        code.set_syntax_parser(Some(SyntaxParser::new(Grammar::Script, code.foreground())));
        let mut output = TextBuffer::new(FontHandle::clone(font), bounds);
        output.set_readonly(true);
        output.set_wrap_lines(true);
        output.set_cursor_visible(false);
        let mut panel = Self {
            code,
            output,
            cube: CubeData::default(),
        };
        panel.set_bounds(bounds);
        panel
    }

    /// Grid produced by the last successful run.
    #[must_use]
    pub fn cube(&self) -> &CubeData {
        &self.cube
    }

    fn set_bounds(&mut self, bounds: Rect) {
        let half = bounds.width / 2.0;
        self.code
            .set_bounds(inset(Rect::new(bounds.x, bounds.y, half, bounds.height)));
        let out_height = bounds.height / 3.0;
        self.output.set_bounds(inset(Rect::new(
            bounds.x + half,
            bounds.y + bounds.height - out_height,
            half,
            out_height,
        )));
    }

    fn update(&mut self, input: &mut dyn Input) -> Option<PanelEvent> {
        if self.code.has_focus() && shift_enter(input) {
            return Some(PanelEvent::RunScript);
        }
        self.code.update(input);
        self.output.update(input);
        None
    }

    fn on_config_reload(&mut self, config: &Config) {
        apply_look(&mut self.code, config);
        self.code.set_wrap_lines(config.wrap_lines);
        self.code
            .set_syntax_parser(parser_for(Grammar::Script, config));
        apply_look(&mut self.output, config);
    }

    /// Write a message into the output buffer, replacing what was there.
    pub fn report(&mut self, message: &str) {
        self.output.clear();
        self.output.insert_text(message);
        self.output.jump_to_buffer_top(false);
    }

    /// Run the code buffer over a grid of `dims`.
    ///
    /// On failure the error is written to the output buffer and the previous
    /// grid is kept.
    pub fn run(&mut self, engine: &mut dyn VoxelScript, dims: (usize, usize, usize)) -> Result<()> {
        let source = self.code.contents();
        match evaluate_cube(engine, &source, dims) {
            Ok(cube) => {
                self.cube = cube;
                self.output.clear();
                Ok(())
            }
            Err(err) => {
                emit_log(LogLevel::Warn, &format!("script run failed: {err}"));
                self.report(&err.to_string());
                Err(err)
            }
        }
    }

    /// Compare the current grid against `level` and report completion.
    pub fn check(&mut self, level: &LevelData) -> bool {
        let solved = level.is_solved_by(&self.cube);
        if solved {
            let name = if level.name.is_empty() {
                "Level"
            } else {
                level.name.as_str()
            };
            self.report(&format!("{name} complete!"));
        }
        solved
    }
}

/// Readonly list of levels; the cursor line picks one.
#[derive(Debug)]
pub struct LevelsPanel {
    pub list: TextBuffer,
    levels: Vec<LevelData>,
}

impl LevelsPanel {
    #[must_use]
    pub fn new(font: &FontHandle, bounds: Rect, levels: Vec<LevelData>) -> Self {
        let mut list = TextBuffer::new(FontHandle::clone(font), inset(bounds));
        list.set_wrap_lines(true);
        list.insert_line("# Select a level by moving the cursor onto its name and press ENTER");
        list.insert_line("");
        for (index, level) in levels.iter().enumerate() {
            list.insert_line(&format!("{LEVEL_ENTRY}{}", display_name(index, level)));
        }
        list.set_readonly(true);
        list.set_syntax_parser(Some(SyntaxParser::new(Grammar::Markup, list.foreground())));
        list.jump_to_buffer_top(false);
        Self { list, levels }
    }

    #[must_use]
    pub fn levels(&self) -> &[LevelData] {
        &self.levels
    }

    /// Index of the level under the cursor.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        let line = self.list.cursor().line;
        let index = line.checked_sub(LEVEL_LIST_HEADER)?;
        let entry = self.list.line(line)?;
        (index < self.levels.len() && entry.as_bytes().starts_with(LEVEL_ENTRY.as_bytes()))
            .then_some(index)
    }

    fn update(&mut self, input: &mut dyn Input) -> Option<PanelEvent> {
        if self.list.has_focus() && enter(input) {
            if let Some(index) = self.selected() {
                return Some(PanelEvent::LoadLevel(index));
            }
        }
        self.list.update(input);
        None
    }
}

fn display_name(index: usize, level: &LevelData) -> String {
    if level.name.is_empty() {
        format!("LEVEL_{:02}", index + 1)
    } else {
        level.name.clone()
    }
}

/// Readonly, wrapped help text.
#[derive(Debug)]
pub struct HelpPanel {
    pub buffer: TextBuffer,
}

impl HelpPanel {
    #[must_use]
    pub fn new(font: &FontHandle, bounds: Rect) -> Self {
        let mut buffer = TextBuffer::new(FontHandle::clone(font), inset(bounds));
        buffer.set_wrap_lines(true);
        buffer.insert_text(HELP_TEXT);
        buffer.set_readonly(true);
        buffer.set_cursor_visible(false);
        buffer.set_syntax_parser(Some(SyntaxParser::new(Grammar::Markup, buffer.foreground())));
        buffer.jump_to_buffer_top(false);
        Self { buffer }
    }
}

/// Editable config source.
#[derive(Debug)]
pub struct ConfigPanel {
    pub buffer: TextBuffer,
}

impl ConfigPanel {
    #[must_use]
    pub fn new(font: &FontHandle, bounds: Rect, config: &Config) -> Self {
        let mut buffer = TextBuffer::new(FontHandle::clone(font), inset(bounds));
        buffer.set_syntax_parser(Some(SyntaxParser::new(Grammar::Script, buffer.foreground())));
        let mut panel = Self { buffer };
        panel.load(config);
        panel
    }

    /// Replace the buffer contents with `config`'s source.
    pub fn load(&mut self, config: &Config) {
        self.buffer.clear();
        self.buffer.insert_text(&config.to_source());
        self.buffer.jump_to_buffer_top(false);
    }

    /// Parse the buffer contents.
    pub fn parse(&self) -> Result<Config> {
        Config::parse(&self.buffer.contents())
    }

    fn update(&mut self, input: &mut dyn Input) -> Option<PanelEvent> {
        let ctrl = input.modifiers().contains(KeyModifiers::CTRL);
        if self.buffer.has_focus() && shift_enter(input) {
            return match self.parse() {
                Ok(config) => {
                    emit_log(LogLevel::Info, "config reloaded");
                    Some(PanelEvent::ReloadConfig(config))
                }
                Err(err) => {
                    emit_log(LogLevel::Warn, &format!("config not applied: {err}"));
                    None
                }
            };
        }
        if self.buffer.has_focus() && ctrl && input.is_key_pressed(Key::Char('r')) {
            self.load(&Config::default());
            return None;
        }
        self.buffer.update(input);
        None
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::backend::Vec2;
    use crate::backend::headless::{FixedFont, RecordingCanvas, ScriptedInput};
    use crate::color::Color;
    use crate::error::Error;
    use crate::input::MouseButton;
    use crate::level::parse_level;
    use crate::script::VoxelGlobals;

    fn font() -> FontHandle {
        Rc::new(FixedFont::new(20.0, 10.0, 20.0))
    }

    fn area() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn paint_red(_: &str, _: &VoxelGlobals) -> std::result::Result<u32, String> {
        Ok(Color::RED.to_hex_u32())
    }

    #[test]
    fn test_panel_names() {
        let font = font();
        let panels = [
            Panel::Editor(EditorPanel::new(&font, area())),
            Panel::Levels(LevelsPanel::new(&font, area(), Vec::new())),
            Panel::Help(HelpPanel::new(&font, area())),
            Panel::Config(ConfigPanel::new(&font, area(), &Config::default())),
        ];
        let names: Vec<_> = panels.iter().map(Panel::name).collect();
        assert_eq!(names, ["editor", "levels", "help", "config"]);
    }

    #[test]
    fn test_editor_run_and_check() {
        let mut editor = EditorPanel::new(&font(), area());
        editor.code.insert_text("Color = red");
        let mut engine = paint_red;
        editor.run(&mut engine, (1, 1, 1)).unwrap();
        assert_eq!(editor.cube()[(0, 0, 0)], Color::RED);

        let level = parse_level("header:\nname = Dot\nX = 1\nY = 1\nZ = 1\ndata:\nred\n").unwrap();
        assert!(editor.check(&level));
        assert!(editor.output.contents().starts_with("Dot complete!"));
    }

    #[test]
    fn test_editor_failed_run_keeps_cube() {
        let mut editor = EditorPanel::new(&font(), area());
        let mut engine = paint_red;
        editor.run(&mut engine, (1, 1, 1)).unwrap();

        let mut broken = |_: &str, _: &VoxelGlobals| -> std::result::Result<u32, String> {
            Err("unexpected symbol near 'end'".to_string())
        };
        let err = editor.run(&mut broken, (1, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::Script(_)));
        assert_eq!(editor.cube()[(0, 0, 0)], Color::RED);
        assert!(editor.output.contents().contains("unexpected symbol"));
        assert!(editor.output.is_readonly());
    }

    #[test]
    fn test_editor_shift_enter_requests_run() {
        let mut panel = Panel::Editor(EditorPanel::new(&font(), area()));
        let mut input = ScriptedInput::new();
        input.click(MouseButton::Left, Vec2::new(10.0, 30.0));
        assert_eq!(panel.update(&mut input), None);
        input.next_frame();
        input.chord(Key::LeftShift, Key::Enter);
        assert_eq!(panel.update(&mut input), Some(PanelEvent::RunScript));
        let Panel::Editor(editor) = &panel else {
            unreachable!()
        };
        assert_eq!(editor.code.line_count(), 1);
    }

    #[test]
    fn test_levels_selection() {
        let levels = vec![
            LevelData {
                name: "Cube".to_string(),
                ..LevelData::default()
            },
            LevelData::default(),
        ];
        let mut panel = LevelsPanel::new(&font(), area(), levels);
        assert_eq!(panel.selected(), None);
        assert_eq!(panel.list.line(3).map(|l| l.text().into_owned()), Some(" - LEVEL_02".to_string()));

        panel.list.move_down(3, false);
        assert_eq!(panel.selected(), Some(1));
        assert!(panel.list.is_readonly());
    }

    #[test]
    fn test_levels_enter_loads() {
        let levels = vec![LevelData::default()];
        let mut panel = Panel::Levels(LevelsPanel::new(&font(), area(), levels));
        if let Panel::Levels(p) = &mut panel {
            p.list.set_focus(true);
            p.list.move_down(2, false);
        }
        let mut input = ScriptedInput::new();
        input.press(Key::Enter);
        assert_eq!(panel.update(&mut input), Some(PanelEvent::LoadLevel(0)));
    }

    #[test]
    fn test_help_panel_setup() {
        let panel = HelpPanel::new(&font(), area());
        assert!(panel.buffer.is_readonly());
        assert!(panel.buffer.is_wrapping_lines());
        assert!(!panel.buffer.is_cursor_visible());
        assert!(panel.buffer.is_cursor_at_beginning());
        assert_eq!(
            panel.buffer.syntax_parser().map(|p| p.grammar),
            Some(Grammar::Markup)
        );
    }

    #[test]
    fn test_config_panel_round_trip() {
        let config = Config {
            font_size: 30.0,
            ..Config::default()
        };
        let mut panel = ConfigPanel::new(&font(), area(), &config);
        assert_eq!(panel.parse().unwrap(), config);

        panel.buffer.jump_to_buffer_bottom(false);
        panel.buffer.insert_text("FontSize = oops");
        assert!(panel.parse().is_err());
    }

    #[test]
    fn test_config_reload_applies_to_buffers() {
        let font = font();
        let config = Config {
            foreground_color: Color::YELLOW,
            background_color: Color::BLUE,
            wrap_lines: true,
            font_size: 30.0,
            syntax_highlighting: false,
        };
        let mut editor = Panel::Editor(EditorPanel::new(&font, area()));
        editor.on_config_reload(&config);
        let Panel::Editor(p) = &editor else {
            unreachable!()
        };
        assert_eq!(p.code.foreground(), Color::YELLOW);
        assert_eq!(p.code.background(), Color::BLUE);
        assert_eq!(p.code.font_size(), 30.0);
        assert!(p.code.is_wrapping_lines());
        assert!(p.code.syntax_parser().is_none());
    }

    #[test]
    fn test_draw_editor_draws_both_buffers() {
        let panel = Panel::Editor(EditorPanel::new(&font(), area()));
        let mut canvas = RecordingCanvas::new();
        panel.draw(&mut canvas);
        let scissors = canvas
            .commands
            .iter()
            .filter(|c| matches!(c, crate::backend::headless::DrawCommand::BeginScissor(_)))
            .count();
        assert_eq!(scissors, 2);
    }
}
