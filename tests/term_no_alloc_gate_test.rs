use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use std::time::Duration;

use term_snake::core::{GameConfig, GameSession, GameSnapshot, TickEvent};
use term_snake::term::{encode_diff_into, FrameBuffer, GameView};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn snapshot_render_and_diff_are_allocation_free_after_warmup() {
    let view = GameView::default();
    let config = GameConfig {
        height: 20,
        width: 40,
        two_players: true,
        ..GameConfig::default()
    };
    let viewport = view.required_viewport(config.height, config.width);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut game = GameSession::new(config, 1).unwrap();
    let mut snap = GameSnapshot::default();
    let mut out = Vec::new();

    // Warm-up (snapshot capacity, framebuffer size, output buffer).
    game.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut fb);
    let prev = fb.clone();
    game.tick(TickEvent::Timeout, Duration::from_millis(300));
    game.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut fb);
    encode_diff_into(&prev, &fb, &mut out).unwrap();

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
            out.clear();
            encode_diff_into(&prev, &fb, &mut out).unwrap();
        }
    });

    assert_eq!(allocs, 0);
}
