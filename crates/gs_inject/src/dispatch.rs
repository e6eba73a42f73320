// crates/gs_inject/src/dispatch.rs

//! LID 类型分派
//!
//! `[LID_CONTROLS]` 中的类型代码映射为 [`DeviceKind`]，每种类型对应一个
//! [`SplitPolicy`]，由同一个拆分函数消费。

use std::fmt;

/// SWMM 支持的 LID 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// 雨水桶
    RainBarrel,
    /// 透水铺装
    PermeablePavement,
    /// 生物滞留池
    BioRetentionCell,
    /// 雨水花园
    RainGarden,
    /// 植草沟
    VegetativeSwale,
    /// 屋面断接
    RooftopDisconnection,
    /// 绿色屋顶
    GreenRoof,
    /// 渗渠
    InfiltrationTrench,
}

/// 不透水面积流入比例（fromImp）的取值方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoutedFractionRule {
    /// 按配对屋顶面积占父区域不透水面积的比例重算
    FromRoofArea,
    /// 固定值（只截留直接降雨的设备为 0）
    Fixed(f64),
}

/// 拆分策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPolicy {
    /// 是否划出配对的屋顶子区域
    pub paired_roof: bool,
    /// fromImp 取值方式
    pub routed_fraction: RoutedFractionRule,
}

impl DeviceKind {
    /// 全部类型
    pub const ALL: [DeviceKind; 8] = [
        DeviceKind::RainBarrel,
        DeviceKind::PermeablePavement,
        DeviceKind::BioRetentionCell,
        DeviceKind::RainGarden,
        DeviceKind::VegetativeSwale,
        DeviceKind::RooftopDisconnection,
        DeviceKind::GreenRoof,
        DeviceKind::InfiltrationTrench,
    ];

    /// 由类型代码解析（不区分大小写）
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(code))
    }

    /// 类型代码
    pub fn code(&self) -> &'static str {
        match self {
            Self::RainBarrel => "RB",
            Self::PermeablePavement => "PP",
            Self::BioRetentionCell => "BC",
            Self::RainGarden => "RG",
            Self::VegetativeSwale => "VS",
            Self::RooftopDisconnection => "RD",
            Self::GreenRoof => "GR",
            Self::InfiltrationTrench => "IT",
        }
    }

    /// 拆分策略
    pub fn policy(&self) -> SplitPolicy {
        match self {
            Self::RainBarrel => SplitPolicy {
                paired_roof: true,
                routed_fraction: RoutedFractionRule::FromRoofArea,
            },
            _ => SplitPolicy {
                paired_roof: false,
                routed_fraction: RoutedFractionRule::Fixed(0.0),
            },
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
