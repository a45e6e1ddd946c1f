use serde::Deserialize;
use uuid::Uuid;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::error::reply;
use crate::state::AppState;
use vocab_types::{Difficulty, NewWord, NewWordList, SettingsUpdate, WordListUpdate, WordUpdate};

pub mod config;
pub mod door_service;
pub mod enrichment;
pub mod error;
pub mod events;
pub mod library_service;
pub mod settings_service;
pub mod state;
pub mod story_service;
pub mod timers;
pub mod websocket;

const JSON_BODY_LIMIT: u64 = 64 * 1024;

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

#[derive(Deserialize)]
struct ReviewRequest {
    known: bool,
}

#[derive(Deserialize)]
struct AnswerRequest {
    option_index: usize,
}

#[derive(Deserialize)]
struct DifficultyRequest {
    difficulty: Difficulty,
}

#[derive(Deserialize)]
struct LevelAnswersRequest {
    answers: Vec<usize>,
}

#[derive(Deserialize)]
struct StartDoorsRequest {
    difficulty: Difficulty,
    total_rounds: Option<u32>,
}

#[derive(Deserialize)]
struct SelectDoorRequest {
    index: usize,
}

type ApiReply = Result<WithStatus<Json>, warp::Rejection>;

fn json_body<T: serde::de::DeserializeOwned + Send>()
-> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(JSON_BODY_LIMIT).and(warp::body::json())
}

fn deleted() -> serde_json::Value {
    serde_json::json!({ "success": true })
}

pub fn create_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // Clone for filters
    let state_filter = warp::any().map({
        let state = state.clone();
        move || state.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // Word lists
    let list_index = warp::path!("lists")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_list_index);

    let create_list = warp::path!("lists")
        .and(warp::post())
        .and(json_body::<NewWordList>())
        .and(state_filter.clone())
        .and_then(handle_create_list);

    let get_list = warp::path!("lists" / Uuid)
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_get_list);

    let update_list = warp::path!("lists" / Uuid)
        .and(warp::put())
        .and(json_body::<WordListUpdate>())
        .and(state_filter.clone())
        .and_then(handle_update_list);

    let delete_list = warp::path!("lists" / Uuid)
        .and(warp::delete())
        .and(state_filter.clone())
        .and_then(handle_delete_list);

    let add_word = warp::path!("lists" / Uuid / "words")
        .and(warp::post())
        .and(json_body::<NewWord>())
        .and(state_filter.clone())
        .and_then(handle_add_word);

    let update_word = warp::path!("lists" / Uuid / "words" / Uuid)
        .and(warp::put())
        .and(json_body::<WordUpdate>())
        .and(state_filter.clone())
        .and_then(handle_update_word);

    let delete_word = warp::path!("lists" / Uuid / "words" / Uuid)
        .and(warp::delete())
        .and(state_filter.clone())
        .and_then(handle_delete_word);

    let review_word = warp::path!("lists" / Uuid / "words" / Uuid / "review")
        .and(warp::post())
        .and(json_body::<ReviewRequest>())
        .and(state_filter.clone())
        .and_then(handle_review_word);

    let finish_learning = warp::path!("lists" / Uuid / "learning" / "finish")
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(handle_finish_learning);

    let list_results = warp::path!("lists" / Uuid / "results")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_list_results);

    let search = warp::path!("search")
        .and(warp::get())
        .and(warp::query::<SearchQuery>())
        .and(state_filter.clone())
        .and_then(handle_search);

    let progress = warp::path!("progress")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_progress);

    // Quizzes
    let start_quiz = warp::path!("lists" / Uuid / "quiz")
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(handle_start_quiz);

    let get_quiz = warp::path!("quiz" / Uuid)
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_get_quiz);

    let answer_quiz = warp::path!("quiz" / Uuid / "answer")
        .and(warp::post())
        .and(json_body::<AnswerRequest>())
        .and(state_filter.clone())
        .and_then(handle_answer_quiz);

    let next_quiz = warp::path!("quiz" / Uuid / "next")
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(handle_next_quiz);

    // Story adventure
    let story = warp::path!("story")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_story);

    let story_difficulty = warp::path!("story" / "difficulty")
        .and(warp::put())
        .and(json_body::<DifficultyRequest>())
        .and(state_filter.clone())
        .and_then(handle_story_difficulty);

    let story_start = warp::path!("story" / "start")
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(handle_story_start);

    let story_reset = warp::path!("story" / "reset")
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(handle_story_reset);

    let story_level = warp::path!("story" / "levels" / u8)
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_story_level);

    let complete_level = warp::path!("story" / "levels" / u8 / "complete")
        .and(warp::post())
        .and(json_body::<LevelAnswersRequest>())
        .and(state_filter.clone())
        .and_then(handle_complete_level);

    let story_enrich = warp::path!("story" / "enrich")
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(handle_story_enrich);

    // Door game
    let doors = warp::path!("doors")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_doors);

    let doors_start = warp::path!("doors" / "start")
        .and(warp::post())
        .and(json_body::<StartDoorsRequest>())
        .and(state_filter.clone())
        .and_then(handle_doors_start);

    let doors_select = warp::path!("doors" / "select")
        .and(warp::post())
        .and(json_body::<SelectDoorRequest>())
        .and(state_filter.clone())
        .and_then(handle_doors_select);

    let doors_next = warp::path!("doors" / "next")
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(handle_doors_next);

    let doors_reset = warp::path!("doors" / "reset")
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(handle_doors_reset);

    // WebSocket endpoint
    let doors_ws = warp::path!("doors" / "ws")
        .and(warp::ws())
        .and(state_filter.clone())
        .map(|ws: warp::ws::Ws, state: AppState| {
            ws.on_upgrade(move |socket| {
                websocket::handle_connection(socket, state.connections, state.doors)
            })
        });

    // Settings
    let get_settings = warp::path!("settings")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(handle_get_settings);

    let update_settings = warp::path!("settings")
        .and(warp::put())
        .and(json_body::<SettingsUpdate>())
        .and(state_filter.clone())
        .and_then(handle_update_settings);

    let reset_settings = warp::path!("settings" / "reset")
        .and(warp::post())
        .and(state_filter.clone())
        .and_then(handle_reset_settings);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    let library_routes = list_index
        .or(create_list)
        .or(get_list)
        .or(update_list)
        .or(delete_list)
        .or(add_word)
        .or(update_word)
        .or(delete_word)
        .or(review_word)
        .or(finish_learning)
        .or(list_results)
        .or(search)
        .or(progress);

    let quiz_routes = start_quiz.or(get_quiz).or(answer_quiz).or(next_quiz);

    let story_routes = story
        .or(story_difficulty)
        .or(story_start)
        .or(story_reset)
        .or(story_level)
        .or(complete_level)
        .or(story_enrich);

    let door_routes = doors_ws
        .or(doors)
        .or(doors_start)
        .or(doors_select)
        .or(doors_next)
        .or(doors_reset);

    let settings_routes = get_settings.or(update_settings).or(reset_settings);

    health
        .or(library_routes)
        .or(quiz_routes)
        .or(story_routes)
        .or(door_routes)
        .or(settings_routes)
        .with(cors)
        .with(warp::log("vocab_quest"))
}

async fn handle_list_index(state: AppState) -> ApiReply {
    Ok(warp::reply::with_status(
        warp::reply::json(&state.library.summaries().await),
        StatusCode::OK,
    ))
}

async fn handle_create_list(new_list: NewWordList, state: AppState) -> ApiReply {
    Ok(reply(
        state.library.create_list(new_list).await,
        StatusCode::CREATED,
    ))
}

async fn handle_get_list(list_id: Uuid, state: AppState) -> ApiReply {
    Ok(reply(state.library.list(list_id).await, StatusCode::OK))
}

async fn handle_update_list(list_id: Uuid, update: WordListUpdate, state: AppState) -> ApiReply {
    Ok(reply(
        state.library.update_list(list_id, update).await,
        StatusCode::OK,
    ))
}

async fn handle_delete_list(list_id: Uuid, state: AppState) -> ApiReply {
    let result = state.library.delete_list(list_id).await.map(|_| deleted());
    Ok(reply(result, StatusCode::OK))
}

async fn handle_add_word(list_id: Uuid, word: NewWord, state: AppState) -> ApiReply {
    Ok(reply(
        state.library.add_word(list_id, word).await,
        StatusCode::CREATED,
    ))
}

async fn handle_update_word(
    list_id: Uuid,
    word_id: Uuid,
    update: WordUpdate,
    state: AppState,
) -> ApiReply {
    Ok(reply(
        state.library.update_word(list_id, word_id, update).await,
        StatusCode::OK,
    ))
}

async fn handle_delete_word(list_id: Uuid, word_id: Uuid, state: AppState) -> ApiReply {
    let result = state
        .library
        .delete_word(list_id, word_id)
        .await
        .map(|_| deleted());
    Ok(reply(result, StatusCode::OK))
}

async fn handle_review_word(
    list_id: Uuid,
    word_id: Uuid,
    review: ReviewRequest,
    state: AppState,
) -> ApiReply {
    Ok(reply(
        state
            .library
            .review_word(list_id, word_id, review.known)
            .await,
        StatusCode::OK,
    ))
}

async fn handle_finish_learning(list_id: Uuid, state: AppState) -> ApiReply {
    Ok(reply(
        state.library.finish_learning(list_id).await,
        StatusCode::OK,
    ))
}

async fn handle_list_results(list_id: Uuid, state: AppState) -> ApiReply {
    Ok(reply(state.library.results_for(list_id).await, StatusCode::OK))
}

async fn handle_search(query: SearchQuery, state: AppState) -> ApiReply {
    let results = state
        .library
        .search(query.q.as_deref().unwrap_or_default())
        .await;
    Ok(warp::reply::with_status(
        warp::reply::json(&results),
        StatusCode::OK,
    ))
}

async fn handle_progress(state: AppState) -> ApiReply {
    Ok(warp::reply::with_status(
        warp::reply::json(&state.library.overview().await),
        StatusCode::OK,
    ))
}

async fn handle_start_quiz(list_id: Uuid, state: AppState) -> ApiReply {
    Ok(reply(
        state.library.start_quiz(list_id).await,
        StatusCode::CREATED,
    ))
}

async fn handle_get_quiz(session_id: Uuid, state: AppState) -> ApiReply {
    Ok(reply(state.library.quiz(session_id), StatusCode::OK))
}

async fn handle_answer_quiz(session_id: Uuid, answer: AnswerRequest, state: AppState) -> ApiReply {
    let result = state
        .library
        .answer(session_id, answer.option_index)
        .map(|outcome| {
            serde_json::json!({
                "accepted": outcome.is_some(),
                "outcome": outcome,
            })
        });
    Ok(reply(result, StatusCode::OK))
}

async fn handle_next_quiz(session_id: Uuid, state: AppState) -> ApiReply {
    Ok(reply(state.library.next(session_id).await, StatusCode::OK))
}

async fn handle_story(state: AppState) -> ApiReply {
    Ok(warp::reply::with_status(
        warp::reply::json(&state.story.view().await),
        StatusCode::OK,
    ))
}

async fn handle_story_difficulty(request: DifficultyRequest, state: AppState) -> ApiReply {
    Ok(reply(
        state.story.set_difficulty(request.difficulty).await,
        StatusCode::OK,
    ))
}

async fn handle_story_start(state: AppState) -> ApiReply {
    Ok(warp::reply::with_status(
        warp::reply::json(&state.story.start().await),
        StatusCode::OK,
    ))
}

async fn handle_story_reset(state: AppState) -> ApiReply {
    Ok(reply(state.story.reset().await, StatusCode::OK))
}

async fn handle_story_level(level_id: u8, state: AppState) -> ApiReply {
    Ok(reply(state.story.level(level_id).await, StatusCode::OK))
}

async fn handle_complete_level(
    level_id: u8,
    request: LevelAnswersRequest,
    state: AppState,
) -> ApiReply {
    Ok(reply(
        state.story.complete_level(level_id, &request.answers).await,
        StatusCode::OK,
    ))
}

async fn handle_story_enrich(state: AppState) -> ApiReply {
    Ok(reply(state.story.enrich().await, StatusCode::OK))
}

async fn handle_doors(state: AppState) -> ApiReply {
    Ok(warp::reply::with_status(
        warp::reply::json(&state.doors.state().await),
        StatusCode::OK,
    ))
}

async fn handle_doors_start(request: StartDoorsRequest, state: AppState) -> ApiReply {
    Ok(reply(
        state
            .doors
            .start(request.difficulty, request.total_rounds)
            .await,
        StatusCode::OK,
    ))
}

async fn handle_doors_select(request: SelectDoorRequest, state: AppState) -> ApiReply {
    Ok(reply(
        state.doors.select_door(request.index).await,
        StatusCode::OK,
    ))
}

async fn handle_doors_next(state: AppState) -> ApiReply {
    Ok(reply(state.doors.next_round().await, StatusCode::OK))
}

async fn handle_doors_reset(state: AppState) -> ApiReply {
    Ok(reply(state.doors.reset().await, StatusCode::OK))
}

async fn handle_get_settings(state: AppState) -> ApiReply {
    Ok(warp::reply::with_status(
        warp::reply::json(&state.settings.get().await),
        StatusCode::OK,
    ))
}

async fn handle_update_settings(update: SettingsUpdate, state: AppState) -> ApiReply {
    Ok(reply(state.settings.update(update).await, StatusCode::OK))
}

async fn handle_reset_settings(state: AppState) -> ApiReply {
    Ok(reply(state.settings.reset().await, StatusCode::OK))
}
