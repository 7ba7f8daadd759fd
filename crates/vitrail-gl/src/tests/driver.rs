use vitrail_api::{
    Bitmap, BitmapFormat, GpuCommand, GpuDriver, GpuState, IndexBuffer, PathVertex,
    RenderBufferDesc, ShaderKind, TextureId, VertexBuffer,
};

use super::fake::{Call, FakeBackend};
use crate::backend::ShaderStage;
use crate::driver::GlDriver;
use crate::error::{DriverError, ResourceKind};

fn new_driver() -> (FakeBackend, GlDriver<FakeBackend>) {
    let backend = FakeBackend::new();
    let driver = GlDriver::new(backend.clone()).unwrap();
    backend.clear_calls();
    (backend, driver)
}

fn triangle() -> (VertexBuffer, IndexBuffer) {
    let vertices = [
        PathVertex { position: [0.0, 0.0], color: [255, 255, 255, 255], uv: [0.0, 1.0] },
        PathVertex { position: [1.0, 0.0], color: [255, 255, 255, 255], uv: [0.0, 1.0] },
        PathVertex { position: [0.0, 1.0], color: [255, 255, 255, 255], uv: [0.0, 1.0] },
    ];
    (
        VertexBuffer::from_path_vertices(&vertices),
        IndexBuffer::new(vec![0, 1, 2]),
    )
}

// ── construction ───────────────────────────────────────────────────────────

#[test]
fn construction_builds_two_distinct_programs() {
    let (backend, driver) = new_driver();
    assert_eq!(backend.live_programs(), 2);
    assert_eq!(backend.live_shaders(), 0);
    assert_ne!(driver.path_program().handle(), driver.fill_program().handle());
}

#[test]
fn construction_fails_on_shader_error() {
    let backend = FakeBackend::new();
    backend.fail_compile(ShaderStage::Fragment, "bad fragment");
    let Err(err) = GlDriver::new(backend) else {
        panic!("expected construction to fail");
    };
    assert!(matches!(err, DriverError::Compile { .. }));
}

// ── id allocation ──────────────────────────────────────────────────────────

#[test]
fn ids_start_at_zero_and_ascend() {
    let (_backend, mut driver) = new_driver();
    assert_eq!(driver.next_texture_id().unwrap(), TextureId(0));
    assert_eq!(driver.next_texture_id().unwrap(), TextureId(1));
    assert_eq!(driver.next_texture_id().unwrap(), TextureId(2));
}

#[test]
fn namespaces_are_independent() {
    let (_backend, mut driver) = new_driver();
    let texture = driver.next_texture_id().unwrap();
    let geometry = driver.next_geometry_id().unwrap();
    let render_buffer = driver.next_render_buffer_id().unwrap();
    // Same numeric value in each namespace, all simultaneously valid.
    assert_eq!(texture.raw(), 0);
    assert_eq!(geometry.raw(), 0);
    assert_eq!(render_buffer.raw(), 0);
}

#[test]
fn destroyed_texture_id_is_reused() {
    let (_backend, mut driver) = new_driver();
    for _ in 0..3 {
        driver.next_texture_id().unwrap();
    }
    driver.destroy_texture(TextureId(1)).unwrap();
    assert_eq!(driver.next_texture_id().unwrap(), TextureId(1));
    assert_eq!(driver.next_texture_id().unwrap(), TextureId(3));
}

// ── textures ───────────────────────────────────────────────────────────────

#[test]
fn create_then_update_reuses_the_gl_texture() {
    let (backend, mut driver) = new_driver();
    let id = driver.next_texture_id().unwrap();
    let bitmap = Bitmap::zeroed(8, 8, BitmapFormat::Bgra8);
    driver.create_texture(id, &bitmap).unwrap();
    driver.update_texture(id, &bitmap).unwrap();

    assert_eq!(backend.live_textures(), 1);
    let uploads: Vec<u32> = backend
        .calls()
        .iter()
        .filter_map(|c| match c {
            Call::UploadTexture { texture, .. } => Some(*texture),
            _ => None,
        })
        .collect();
    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[0], uploads[1]);
}

#[test]
fn destroy_texture_deletes_the_gl_object() {
    let (backend, mut driver) = new_driver();
    let id = driver.next_texture_id().unwrap();
    driver
        .create_texture(id, &Bitmap::zeroed(2, 2, BitmapFormat::A8))
        .unwrap();
    driver.destroy_texture(id).unwrap();
    assert_eq!(backend.live_textures(), 0);
    assert_eq!(
        driver.destroy_texture(id).unwrap_err(),
        DriverError::UnknownId { kind: ResourceKind::Texture, id: id.raw() }
    );
}

#[test]
fn texture_ops_on_unallocated_id_fail() {
    let (_backend, mut driver) = new_driver();
    let bitmap = Bitmap::zeroed(2, 2, BitmapFormat::A8);
    assert!(matches!(
        driver.create_texture(TextureId(5), &bitmap).unwrap_err(),
        DriverError::UnknownId { kind: ResourceKind::Texture, id: 5 }
    ));
}

// ── geometry ───────────────────────────────────────────────────────────────

#[test]
fn geometry_buffers_are_created_as_a_pair() {
    let (backend, mut driver) = new_driver();
    let id = driver.next_geometry_id().unwrap();
    let (vertices, indices) = triangle();
    driver.create_geometry(id, &vertices, &indices).unwrap();

    assert_eq!(backend.live_buffers(), 2);
    let calls = backend.calls();
    assert!(calls.iter().any(|c| matches!(c, Call::UploadVertices { bytes: 60, .. })));
    assert!(calls.iter().any(|c| matches!(c, Call::UploadIndices { count: 3, .. })));

    driver.destroy_geometry(id).unwrap();
    assert_eq!(backend.live_buffers(), 0);
}

#[test]
fn update_geometry_reuses_the_buffer_pair() {
    let (backend, mut driver) = new_driver();
    let id = driver.next_geometry_id().unwrap();
    let (vertices, indices) = triangle();
    driver.create_geometry(id, &vertices, &indices).unwrap();
    driver.update_geometry(id, &vertices, &indices).unwrap();
    assert_eq!(backend.live_buffers(), 2);
}

// ── render buffers ─────────────────────────────────────────────────────────

#[test]
fn render_buffer_referencing_unknown_texture_fails_cleanly() {
    let (backend, mut driver) = new_driver();
    let id = driver.next_render_buffer_id().unwrap();
    let desc = RenderBufferDesc { texture: TextureId(42), width: 16, height: 16 };

    let err = driver.create_render_buffer(id, &desc).unwrap_err();
    assert_eq!(
        err,
        DriverError::UnknownId { kind: ResourceKind::Texture, id: 42 }
    );
    // No dangling framebuffer was created.
    assert_eq!(backend.live_framebuffers(), 0);
}

#[test]
fn render_buffer_may_target_an_unpopulated_texture() {
    let (backend, mut driver) = new_driver();
    let texture = driver.next_texture_id().unwrap();
    let id = driver.next_render_buffer_id().unwrap();
    let desc = RenderBufferDesc { texture, width: 32, height: 16 };
    driver.create_render_buffer(id, &desc).unwrap();

    // Storage was allocated so the attachment is complete before any upload.
    let storage_texture = backend
        .calls()
        .iter()
        .find_map(|c| match c {
            Call::AllocateTextureStorage { texture, width: 32, height: 16 } => Some(*texture),
            _ => None,
        })
        .expect("storage allocated for render target texture");

    // A later pixel upload lands in the same GL texture.
    driver
        .create_texture(texture, &Bitmap::zeroed(32, 16, BitmapFormat::Bgra8))
        .unwrap();
    assert!(backend.calls().iter().any(|c| matches!(
        c,
        Call::UploadTexture { texture, .. } if *texture == storage_texture
    )));
    assert_eq!(backend.live_textures(), 1);
}

#[test]
fn destroying_a_render_buffer_leaves_its_texture_alive() {
    let (backend, mut driver) = new_driver();
    let texture = driver.next_texture_id().unwrap();
    driver
        .create_texture(texture, &Bitmap::zeroed(4, 4, BitmapFormat::Bgra8))
        .unwrap();
    let id = driver.next_render_buffer_id().unwrap();
    driver
        .create_render_buffer(id, &RenderBufferDesc { texture, width: 4, height: 4 })
        .unwrap();

    driver.destroy_render_buffer(id).unwrap();
    assert_eq!(backend.live_framebuffers(), 0);
    assert_eq!(backend.live_textures(), 1);
    driver.destroy_texture(texture).unwrap();
}

// ── command lists ──────────────────────────────────────────────────────────

struct Scene {
    render_buffer: vitrail_api::RenderBufferId,
    geometry: vitrail_api::GeometryId,
}

fn build_scene(driver: &mut GlDriver<FakeBackend>) -> Scene {
    let texture = driver.next_texture_id().unwrap();
    let render_buffer = driver.next_render_buffer_id().unwrap();
    driver
        .create_render_buffer(
            render_buffer,
            &RenderBufferDesc { texture, width: 64, height: 64 },
        )
        .unwrap();
    let geometry = driver.next_geometry_id().unwrap();
    let (vertices, indices) = triangle();
    driver.create_geometry(geometry, &vertices, &indices).unwrap();
    Scene { render_buffer, geometry }
}

#[test]
fn draw_binds_the_program_matching_the_shader_kind() {
    let (backend, mut driver) = new_driver();
    let scene = build_scene(&mut driver);
    backend.clear_calls();

    let commands = [
        GpuCommand::DrawGeometry {
            geometry: scene.geometry,
            indices_count: 3,
            indices_offset: 0,
            state: GpuState::new(scene.render_buffer, ShaderKind::Fill),
        },
        GpuCommand::DrawGeometry {
            geometry: scene.geometry,
            indices_count: 3,
            indices_offset: 0,
            state: GpuState::new(scene.render_buffer, ShaderKind::FillPath),
        },
    ];
    driver.render_command_list(&commands).unwrap();

    let bound: Vec<Option<u32>> = backend
        .calls()
        .iter()
        .filter_map(|c| match c {
            Call::UseProgram(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(
        bound,
        vec![
            Some(driver.fill_program().handle()),
            Some(driver.path_program().handle()),
            // The batch resets to no program when done.
            None,
        ]
    );
}

#[test]
fn clear_binds_the_target_then_clears() {
    let (backend, mut driver) = new_driver();
    let scene = build_scene(&mut driver);
    backend.clear_calls();

    driver
        .render_command_list(&[GpuCommand::ClearRenderBuffer {
            render_buffer: scene.render_buffer,
        }])
        .unwrap();

    let calls = backend.calls();
    let clear = calls.iter().position(|c| matches!(c, Call::Clear)).unwrap();
    assert!(clear > 0);
    assert!(matches!(calls[clear - 1], Call::BindFramebuffer(Some(_))));
}

#[test]
fn draw_with_unknown_geometry_fails() {
    let (_backend, mut driver) = new_driver();
    let scene = build_scene(&mut driver);

    let command = GpuCommand::DrawGeometry {
        geometry: vitrail_api::GeometryId(99),
        indices_count: 3,
        indices_offset: 0,
        state: GpuState::new(scene.render_buffer, ShaderKind::Fill),
    };
    assert_eq!(
        driver.render_command_list(&[command]).unwrap_err(),
        DriverError::UnknownId { kind: ResourceKind::Geometry, id: 99 }
    );
}

#[test]
fn draw_sets_viewport_scissor_and_blend_from_state() {
    let (backend, mut driver) = new_driver();
    let scene = build_scene(&mut driver);
    backend.clear_calls();

    let mut state = GpuState::new(scene.render_buffer, ShaderKind::Fill);
    state.viewport_width = 640;
    state.viewport_height = 480;
    state.enable_blend = false;
    state.enable_scissor = true;
    state.scissor_rect = [10, 20, 30, 40];

    driver
        .render_command_list(&[GpuCommand::DrawGeometry {
            geometry: scene.geometry,
            indices_count: 3,
            indices_offset: 0,
            state,
        }])
        .unwrap();

    let calls = backend.calls();
    assert!(calls.contains(&Call::SetViewport { width: 640, height: 480 }));
    assert!(calls.contains(&Call::SetBlend(false)));
    assert!(calls.contains(&Call::SetScissor(Some([10, 20, 30, 40]))));
    assert!(calls.contains(&Call::DrawIndexed { count: 3, offset: 0 }));
}

// ── synchronize hooks & teardown ───────────────────────────────────────────

#[test]
fn synchronize_hooks_are_no_ops() {
    let (backend, mut driver) = new_driver();
    driver.begin_synchronize();
    driver.end_synchronize();
    assert!(backend.calls().is_empty());
}

#[test]
fn drop_deletes_programs_and_all_live_resources() {
    let backend = FakeBackend::new();
    let mut driver = GlDriver::new(backend.clone()).unwrap();

    let texture = driver.next_texture_id().unwrap();
    driver
        .create_texture(texture, &Bitmap::zeroed(4, 4, BitmapFormat::Bgra8))
        .unwrap();
    let geometry = driver.next_geometry_id().unwrap();
    let (vertices, indices) = triangle();
    driver.create_geometry(geometry, &vertices, &indices).unwrap();
    let render_buffer = driver.next_render_buffer_id().unwrap();
    driver
        .create_render_buffer(
            render_buffer,
            &RenderBufferDesc { texture, width: 4, height: 4 },
        )
        .unwrap();

    drop(driver);

    assert_eq!(backend.live_programs(), 0);
    assert_eq!(backend.live_textures(), 0);
    assert_eq!(backend.live_buffers(), 0);
    assert_eq!(backend.live_framebuffers(), 0);
}
