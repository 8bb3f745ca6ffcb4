use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use arcade_tetris::core::{GameEngine, GameSession, GameSnapshot};
use arcade_tetris::term::{FrameBuffer, GameView, ReportStatusView, Viewport};
use arcade_tetris::types::{GameAction, Phase};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
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
fn game_loop_hot_paths_do_not_allocate() {
    // Setup outside counting so one-time allocations don't trip the gate.
    let mut session = GameSession::new(GameEngine::with_seed(1));
    session.apply(GameAction::Start);
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let report = ReportStatusView::Hidden;
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    // Warm-up.
    session.advance(16);
    session.snapshot_into(&mut snap);
    view.render_into(&snap, &report, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            session.advance(16);
        }
        for _ in 0..50 {
            session.apply(GameAction::MoveLeft);
            session.apply(GameAction::MoveRight);
            session.apply(GameAction::Rotate);
            session.apply(GameAction::SoftDrop);
        }
        for _ in 0..25 {
            session.apply(GameAction::HardDrop);
            session.advance(1000);
            if session.phase() == Phase::GameOver {
                session.restart();
            }
            session.snapshot_into(&mut snap);
            view.render_into(&snap, &report, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
