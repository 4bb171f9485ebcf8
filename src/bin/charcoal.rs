//! Desktop shell: window, file dialogs, and sliders around the charcoal
//! library. All pixel work happens in the library; this binary only wires
//! UI events to `transform` and ticks the animator from the repaint loop.

use std::time::Instant;

use eframe::egui;

use charcoal::{Animator, Raster, SketchParams, TICK_INTERVAL, codec, transform};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Pencil Sketch Portrait",
        native_options,
        Box::new(|_cc| Box::new(SketchApp::default())),
    )
}

struct SketchApp {
    source: Option<Raster>,
    sketch: Option<Raster>,
    blur: u32,
    contrast: u32,
    animator: Animator,
    texture: Option<egui::TextureHandle>,
    last_tick: Instant,
}

impl Default for SketchApp {
    fn default() -> Self {
        let params = SketchParams::default();
        Self {
            source: None,
            sketch: None,
            blur: params.blur_strength,
            contrast: params.contrast_level,
            animator: Animator::new(),
            texture: None,
            last_tick: Instant::now(),
        }
    }
}

impl eframe::App for SketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| match &self.texture {
                Some(tex) => {
                    ui.add(egui::Image::new(tex).shrink_to_fit());
                }
                None => {
                    ui.heading("Upload an image to sketch");
                }
            });
        });

        self.drive_animation(ctx);
    }
}

impl SketchApp {
    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Choose Image").clicked() {
                self.choose_image();
            }
            let save_enabled = self.sketch.is_some();
            if ui
                .add_enabled(save_enabled, egui::Button::new("Save Sketch"))
                .clicked()
            {
                self.save_sketch();
            }
        });

        let mut changed = false;
        changed |= ui
            .add(egui::Slider::new(&mut self.blur, SketchParams::BLUR_RANGE).text("Blur Strength"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.contrast, SketchParams::CONTRAST_RANGE).text("Contrast"))
            .changed();

        // Live update, like dragging the sliders in the original tool.
        if changed && self.source.is_some() {
            self.resketch();
        }
    }

    fn choose_image(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "webp"])
            .pick_file()
        else {
            return;
        };
        match codec::read_image(&path) {
            Ok(raster) => {
                self.source = Some(raster);
                self.resketch();
            }
            // Prior image and sketch stay untouched on a failed load.
            Err(err) => error_dialog("Could not load image", &err),
        }
    }

    /// Re-run the transform on the cached source and restart the reveal.
    fn resketch(&mut self) {
        let Some(source) = &self.source else { return };
        let params = SketchParams::snapped(self.blur, self.contrast);
        match transform(source, params) {
            Ok(sketch) => {
                self.animator.start(sketch.clone());
                self.sketch = Some(sketch);
                self.last_tick = Instant::now();
            }
            Err(err) => error_dialog("Could not sketch image", &err),
        }
    }

    fn save_sketch(&mut self) {
        let Some(sketch) = &self.sketch else { return };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name("sketch_output.jpg")
            .save_file()
        else {
            return;
        };
        match codec::write_image(&path, sketch) {
            Ok(()) => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Info)
                    .set_title("Save Successful")
                    .set_description(format!("Sketch saved to: {}", path.display()))
                    .show();
            }
            // A failed save leaves the sketch and any running animation alone.
            Err(err) => error_dialog("Could not save sketch", &err),
        }
    }

    fn drive_animation(&mut self, ctx: &egui::Context) {
        if !self.animator.is_running() {
            return;
        }
        if self.last_tick.elapsed() >= TICK_INTERVAL {
            if let Some(frame) = self.animator.tick() {
                self.present(ctx, &frame.raster);
            }
            self.last_tick = Instant::now();
        }
        ctx.request_repaint_after(TICK_INTERVAL);
    }

    fn present(&mut self, ctx: &egui::Context, raster: &Raster) {
        let size = [raster.width() as usize, raster.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, &raster.to_rgba8());
        match &mut self.texture {
            Some(tex) => tex.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("sketch", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}

fn error_dialog(title: &str, err: &charcoal::CharcoalError) {
    tracing::error!(error = %err, "{title}");
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(err.to_string())
        .show();
}
