use crate::adapters::pixel_format::blit_with_preview;
use crate::controllers::interactive::ports::surface::Surface;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::view::{PreviewTransform, SurfaceSize};
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use log::warn;
use pixels::Pixels;
use pixels::SurfaceTexture;
use pixels::wgpu;
use winit::window::Window;

const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Window surface backed by a `pixels` framebuffer with an egui overlay.
///
/// Keeps the last painted frame so preview changes can be redrawn without
/// a new render.
pub struct PixelsSurface {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    size: SurfaceSize,
    buffer_size: SurfaceSize,
    frame: Option<PixelBuffer>,
    preview: PreviewTransform,
    dirty: bool,
}

impl Surface for PixelsSurface {
    fn paint(&mut self, buffer: &PixelBuffer) {
        self.frame = Some(buffer.clone());
        self.dirty = true;
    }

    fn apply_preview(&mut self, transform: &PreviewTransform) {
        self.preview = *transform;
        self.dirty = true;
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.dirty = true;

        if size.is_empty() || size == self.buffer_size {
            return;
        }

        if let Err(err) = self.pixels.resize_surface(size.width, size.height) {
            warn!("failed to resize surface to {}x{}: {}", size.width, size.height, err);
            return;
        }
        match self.pixels.resize_buffer(size.width, size.height) {
            Ok(()) => self.buffer_size = size,
            Err(err) => warn!("failed to resize buffer to {}x{}: {}", size.width, size.height, err),
        }
    }
}

impl PixelsSurface {
    pub fn new(window: &'static Window) -> Result<Self, pixels::Error> {
        let inner = window.inner_size();
        let size = SurfaceSize::new(inner.width, inner.height);
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let egui_renderer = EguiRenderer::new(
            pixels.device(),
            pixels.render_texture_format(),
            None, // depth format
            1,    // msaa samples
        );

        Ok(Self {
            pixels,
            egui_renderer,
            size,
            buffer_size: size,
            frame: None,
            preview: PreviewTransform::IDENTITY,
            dirty: true,
        })
    }

    /// Redraws the framebuffer if anything changed, then draws the egui
    /// output on top and presents.
    pub fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
    ) -> Result<(), pixels::Error> {
        if self.size.is_empty() {
            return Ok(());
        }

        if self.dirty {
            self.draw_frame();
            self.dirty = false;
        }

        let size_in_pixels = [self.buffer_size.width, self.buffer_size.height];

        self.pixels.render_with(|encoder, render_target, context| {
            context.scaling_renderer.render(encoder, render_target);

            let clipped_primitives =
                egui_ctx.tessellate(egui_output.shapes, egui_ctx.pixels_per_point());

            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels,
                pixels_per_point: egui_ctx.pixels_per_point(),
            };

            let textures_delta = egui_output.textures_delta;

            for (id, delta) in &textures_delta.set {
                self.egui_renderer
                    .update_texture(&context.device, &context.queue, *id, delta);
            }

            self.egui_renderer.update_buffers(
                &context.device,
                &context.queue,
                encoder,
                &clipped_primitives,
                &screen_descriptor,
            );

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: render_target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load, // keep the fractal underneath
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

                self.egui_renderer.render(
                    &mut render_pass,
                    &clipped_primitives,
                    &screen_descriptor,
                );
            }

            for id in &textures_delta.free {
                self.egui_renderer.free_texture(id);
            }

            Ok(())
        })
    }

    fn draw_frame(&mut self) {
        let width = self.buffer_size.width;
        let height = self.buffer_size.height;
        let target = self.pixels.frame_mut();

        match &self.frame {
            Some(frame) => {
                blit_with_preview(frame, &self.preview, target, width, height, BACKGROUND)
            }
            None => {
                for pixel in target.chunks_exact_mut(4) {
                    pixel.copy_from_slice(&BACKGROUND);
                }
            }
        }
    }
}
