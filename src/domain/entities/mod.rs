//! # Domain Entities Module
//!
//! 엔티티 저장소가 소유하는 로컬 엔티티와, 저장소 조회 결과의 형태를 정의합니다.
//!
//! ## 로컬 엔티티
//!
//! 로컬 엔티티는 스키마를 강제하지 않는 JSON 객체([`Entity`])입니다.
//! 검증기는 다음 두 필드만 다루며, 나머지 속성은 저장소와 소비자가 관리합니다.
//!
//! ```json
//! {
//!   "id": 0,
//!   "steamId": "76561197960287930",
//!   "steam": { "profile": { "id": "76561197960287930", "displayName": "..." },
//!              "identifier": "https://steamcommunity.com/openid/id/76561197960287930" },
//!   "email": "admin@example.com"
//! }
//! ```
//!
//! ## 조회 결과 정규화
//!
//! 저장소는 다음 세 가지 형태를 돌려줄 수 있으며, [`FindResult::into_first`] 가
//! 이를 "첫 번째 엔티티 또는 없음" 으로 정규화합니다.
//!
//! 1. **페이지 봉투** ([`Page`]) - `data` 안의 컬렉션을 먼저 꺼냅니다.
//! 2. **직렬화 가능한 모델** ([`ModelRecord`]) - 1순위 변환(`to_object`)을
//!    2순위 변환(`to_json`)보다 우선 적용합니다.
//! 3. **평범한 객체** - 그대로 사용합니다.

pub mod store_record;

pub use store_record::*;
