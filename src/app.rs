use egui::{Color32, Pos2, Rect, Sense, Stroke as EguiStroke, TextureHandle, TextureOptions, Vec2};
use log::{debug, error};

use crate::canvas::Canvas;
use crate::element::ShapeKind;
use crate::raster::FillMode;
use crate::tool::{EraserMode, HighlighterColor, ToolMode, ToolState};

/// Point size for placed text.
const TEXT_SIZE: f32 = 18.0;

/// A text box that has been clicked open but not yet committed.
struct PendingText {
    anchor: Pos2,
    buffer: String,
}

/// We derive Deserialize/Serialize so we can persist tool preferences on
/// shutdown. The document itself is not persisted.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PaintApp {
    tools: ToolState,
    #[serde(skip)]
    canvas: Canvas,
    // The flattened canvas, uploaded as one texture.
    #[serde(skip)]
    texture: Option<TextureHandle>,
    #[serde(skip)]
    canvas_dirty: bool,
    #[serde(skip)]
    pending_text: Option<PendingText>,
    // Last pointer position while dragging a selected element.
    #[serde(skip)]
    drag_anchor: Option<Pos2>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self {
            tools: ToolState::default(),
            canvas: Canvas::default(),
            texture: None,
            canvas_dirty: true,
            pending_text: None,
            drag_anchor: None,
        }
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        if let Some(storage) = cc.storage {
            if let Some(app) = eframe::get_value(storage, eframe::APP_KEY) {
                return app;
            }
        }
        Self::default()
    }

    fn set_mode(&mut self, mode: ToolMode) {
        if self.tools.mode != mode {
            debug!("tool mode: {:?} -> {:?}", self.tools.mode, mode);
            self.commit_pending_text();
            self.canvas.deselect();
            self.tools.mode = mode;
        }
    }

    fn commit_pending_text(&mut self) {
        if let Some(pending) = self.pending_text.take() {
            if self.canvas.place_text(
                &pending.buffer,
                pending.anchor,
                TEXT_SIZE,
                self.tools.fill_color,
            ) {
                self.canvas_dirty = true;
            }
        }
    }

    // ---- Pointer handling (canvas-local coordinates) ---------------------

    fn on_press(&mut self, pos: Pos2) {
        match self.tools.mode {
            ToolMode::Select => {
                self.canvas.select_at(pos);
                self.drag_anchor = Some(pos);
            }
            ToolMode::Pen => {
                self.canvas
                    .begin_stroke(pos, self.tools.pen_radius(), self.tools.pen_color, false);
            }
            ToolMode::Highlighter => {
                self.canvas.begin_stroke(
                    pos,
                    self.tools.highlighter_radius(),
                    self.tools.highlighter_color.color(),
                    true,
                );
            }
            ToolMode::Eraser => {
                if self
                    .canvas
                    .erase_at(pos, self.tools.eraser_mode, self.tools.eraser_radius())
                {
                    self.canvas_dirty = true;
                }
            }
            ToolMode::Oval => self.canvas.begin_shape(ShapeKind::Oval, pos),
            ToolMode::Rectangle => self.canvas.begin_shape(ShapeKind::Rectangle, pos),
            ToolMode::Line => self.canvas.begin_shape(ShapeKind::Line, pos),
            ToolMode::Bucket => {
                match self.canvas.fill(pos, self.tools.fill_color, FillMode::Bucket) {
                    Ok(_) => self.canvas_dirty = true,
                    Err(err) => debug!("ignoring fill: {err}"),
                }
            }
            ToolMode::Pick => {
                match self.canvas.fill(pos, self.tools.fill_color, FillMode::Pick) {
                    Ok(color) => {
                        // The sampled color becomes both the pen and the
                        // bucket color.
                        self.tools.pen_color = color;
                        self.tools.fill_color = color;
                    }
                    Err(err) => debug!("ignoring pick: {err}"),
                }
            }
            ToolMode::Text => {
                self.commit_pending_text();
                self.pending_text = Some(PendingText {
                    anchor: pos,
                    buffer: String::new(),
                });
            }
        }
    }

    fn on_drag(&mut self, pos: Pos2) {
        match self.tools.mode {
            ToolMode::Select => {
                if let Some(anchor) = self.drag_anchor {
                    let delta = pos - anchor;
                    if delta != Vec2::ZERO && self.canvas.translate_selected(delta) {
                        self.canvas_dirty = true;
                    }
                    self.drag_anchor = Some(pos);
                }
            }
            ToolMode::Pen | ToolMode::Highlighter => self.canvas.extend_stroke(pos),
            ToolMode::Eraser => {
                if self
                    .canvas
                    .erase_at(pos, self.tools.eraser_mode, self.tools.eraser_radius())
                {
                    self.canvas_dirty = true;
                }
            }
            ToolMode::Oval | ToolMode::Rectangle | ToolMode::Line => {
                self.canvas.update_shape(pos);
            }
            _ => {}
        }
    }

    fn on_release(&mut self) {
        match self.tools.mode {
            ToolMode::Pen | ToolMode::Highlighter => {
                if self.canvas.finish_stroke() {
                    self.canvas_dirty = true;
                }
            }
            ToolMode::Oval | ToolMode::Rectangle | ToolMode::Line => {
                if self
                    .canvas
                    .finish_shape(self.tools.pen_color, self.tools.thickness)
                {
                    self.canvas_dirty = true;
                }
            }
            ToolMode::Select => self.drag_anchor = None,
            _ => {}
        }
    }

    // ---- Panels ----------------------------------------------------------

    fn tools_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("tools_panel")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.heading("Tools");

                for mode in ToolMode::ALL {
                    let selected = self.tools.mode == mode;
                    if ui.selectable_label(selected, mode.label()).clicked() {
                        self.set_mode(mode);
                    }
                }
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Color:");
                    let mut color: Color32 = self.tools.pen_color.into();
                    if egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut color,
                        egui::color_picker::Alpha::Opaque,
                    )
                    .changed()
                    {
                        // The picker drives pen and bucket together.
                        self.tools.pen_color = color.into();
                        self.tools.fill_color = color.into();
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Thickness:");
                    ui.add(egui::Slider::new(&mut self.tools.thickness, 1.0..=30.0));
                });
                ui.separator();

                ui.label("Highlighter:");
                ui.radio_value(
                    &mut self.tools.highlighter_color,
                    HighlighterColor::Yellow,
                    "Yellow",
                );
                ui.radio_value(
                    &mut self.tools.highlighter_color,
                    HighlighterColor::Cyan,
                    "Cyan",
                );
                ui.radio_value(
                    &mut self.tools.highlighter_color,
                    HighlighterColor::Magenta,
                    "Magenta",
                );
                ui.separator();

                ui.label("Eraser:");
                ui.radio_value(
                    &mut self.tools.eraser_mode,
                    EraserMode::Partial,
                    "Partial stroke",
                );
                ui.radio_value(
                    &mut self.tools.eraser_mode,
                    EraserMode::WholeStroke,
                    "Full stroke",
                );
                ui.separator();

                if ui.button("Save…").clicked() {
                    self.save_dialog();
                }
                if ui.button("Load…").clicked() {
                    self.load_dialog();
                }
                if ui.button("Clear").clicked() {
                    self.canvas.clear();
                    self.pending_text = None;
                    self.canvas_dirty = true;
                }
            });
    }

    fn save_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("PNG Files", &["png"])
            .set_file_name("drawing.png")
            .save_file();
        if let Some(path) = picked {
            if let Err(err) = self.canvas.save_png(&path) {
                error!("failed to save {}: {err}", path.display());
            }
        }
    }

    fn load_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Image Files", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
            .pick_file();
        if let Some(path) = picked {
            match self.canvas.load_image(&path) {
                Ok(()) => self.canvas_dirty = true,
                Err(err) => error!("failed to load {}: {err}", path.display()),
            }
        }
    }

    fn canvas_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let (width, height) = self.canvas.size();
                let canvas_size = Vec2::new(width as f32, height as f32);
                let (response, painter) =
                    ui.allocate_painter(canvas_size, Sense::click_and_drag());
                let origin = response.rect.min;

                // Upload the flattened document when it changed.
                if self.canvas_dirty || self.texture.is_none() {
                    let image = self.canvas.renderer().color_image(self.canvas.document());
                    self.texture =
                        Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST));
                    self.canvas_dirty = false;
                }
                if let Some(texture) = &self.texture {
                    painter.image(
                        texture.id(),
                        response.rect,
                        Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }

                // Route pointer events in canvas-local coordinates.
                let local = response
                    .interact_pointer_pos()
                    .map(|pos| (pos - origin).to_pos2());
                let (pressed, down, released) = ui.input(|i| {
                    (
                        i.pointer.primary_pressed(),
                        i.pointer.primary_down(),
                        i.pointer.primary_released(),
                    )
                });
                if let Some(pos) = local {
                    if pressed && response.hovered() {
                        self.on_press(pos);
                    } else if down {
                        self.on_drag(pos);
                    }
                }
                if released {
                    self.on_release();
                }

                self.draw_previews(&painter, origin);
                self.pending_text_box(ctx, origin);
            });
        });
    }

    /// In-progress ink and shape drags are drawn as an overlay; they only
    /// reach the raster document when committed.
    fn draw_previews(&self, painter: &egui::Painter, origin: Pos2) {
        let offset = origin.to_vec2();

        if let Some(stroke) = self.canvas.active_stroke() {
            let points: Vec<Pos2> = stroke.points().iter().map(|p| *p + offset).collect();
            let mut color: Color32 = stroke.color().into();
            if stroke.is_highlighter() {
                color = Color32::from(stroke.color().with_alpha(crate::element::stroke::HIGHLIGHTER_ALPHA));
            }
            if points.len() == 1 {
                // A dot preview: egui drops one-point polylines.
                painter.circle_filled(points[0], stroke.radius(), color);
            } else {
                painter.add(egui::Shape::line(
                    points,
                    EguiStroke::new(stroke.radius() * 2.0, color),
                ));
            }
        }

        if let Some(shape) = self.canvas.pending_shape() {
            let stroke = EguiStroke::new(
                self.tools.thickness,
                Color32::from(self.tools.pen_color),
            );
            let start = shape.start + offset;
            let current = shape.current + offset;
            match shape.kind {
                ShapeKind::Line => {
                    painter.line_segment([start, current], stroke);
                }
                ShapeKind::Rectangle => {
                    painter.rect_stroke(Rect::from_two_pos(start, current), 0.0, stroke);
                }
                ShapeKind::Oval => {
                    let rect = Rect::from_two_pos(start, current);
                    let center = rect.center();
                    let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
                    let points: Vec<Pos2> = (0..64)
                        .map(|i| {
                            let t = i as f32 / 64.0 * std::f32::consts::TAU;
                            Pos2::new(center.x + rx * t.cos(), center.y + ry * t.sin())
                        })
                        .collect();
                    painter.add(egui::Shape::closed_line(points, stroke));
                }
            }
        }
    }

    fn pending_text_box(&mut self, ctx: &egui::Context, canvas_origin: Pos2) {
        let Some(pending) = &mut self.pending_text else {
            return;
        };
        let mut commit = false;
        let mut cancel = false;

        egui::Area::new(egui::Id::new("pending_text"))
            .fixed_pos(pending.anchor + canvas_origin.to_vec2())
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut pending.buffer)
                        .hint_text("type, then press Enter")
                        .desired_width(250.0),
                );
                edit.request_focus();
                if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    commit = true;
                }
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    cancel = true;
                }
            });

        if commit {
            self.commit_pending_text();
        } else if cancel {
            self.pending_text = None;
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tools_panel(ctx);
        self.canvas_panel(ctx);
    }
}
